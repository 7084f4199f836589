//! Per-Feature Linear Regression
//!
//! Each predictor gets its own simple-regression slope against delivery speed.
//! The slopes are combined additively around a shared intercept, and a mean
//! residual is carried as a scalar bias. This is not a joint least-squares fit.

use route_metrics::{ConditionAverages, TrainingSample};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ModelError;

/// Length of [`RegressionModel::coefficients`]
pub const COEFFICIENT_COUNT: usize = 6;

/// Slope of one feature against the target.
///
/// `(n·Σxy − Σx·Σy) / (n·Σx² − (Σx)²)`. Returns 0 when the feature is all zeros
/// or when it has no variance (the denominator vanishes within the rounding of
/// `n` accumulated terms).
pub fn calculate_beta(
    sum_x: f64,
    sum_y: f64,
    sum_xy: f64,
    sum_x_squared: f64,
    n: usize,
) -> f64 {
    if sum_x == 0.0 && sum_x_squared == 0.0 {
        return 0.0;
    }

    let n = n as f64;
    let scale = n * sum_x_squared;
    let denominator = scale - sum_x * sum_x;
    if denominator.abs() <= 4.0 * n * f64::EPSILON * scale.abs() {
        return 0.0;
    }

    (n * sum_xy - sum_x * sum_y) / denominator
}

/// Running sums for one feature paired with the target, taken around their means
#[derive(Debug, Clone, Copy, Default)]
struct FeatureSums {
    mean: f64,
    sum: f64,
    sum_squared: f64,
    sum_product: f64,
}

impl FeatureSums {
    fn new(mean: f64) -> Self {
        Self {
            mean,
            ..Default::default()
        }
    }

    fn add(&mut self, x: f64, y_deviation: f64) {
        let d = x - self.mean;
        self.sum += d;
        self.sum_squared += d * d;
        self.sum_product += d * y_deviation;
    }

    /// Slope against the target; 0 when the spread is within rounding of the mean
    fn beta(&self, sum_y_deviation: f64, n: usize) -> f64 {
        if self.sum_squared <= n as f64 * f64::EPSILON * self.mean * self.mean {
            return 0.0;
        }
        calculate_beta(self.sum, sum_y_deviation, self.sum_product, self.sum_squared, n)
    }
}

/// Fitted delivery speed estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionModel {
    pub intercept: f64,
    pub beta_temperature: f64,
    pub beta_humidity: f64,
    pub beta_wind_speed: f64,
    pub beta_weight: f64,
    /// Mean residual of the fit, added to every prediction
    pub mean_residual: f64,
    /// Number of samples the model was fitted on
    pub sample_count: usize,
}

impl RegressionModel {
    /// Fit the model on the given samples
    pub fn fit(samples: &[TrainingSample]) -> Result<Self, ModelError> {
        if samples.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }

        let count = samples.len();
        let n = count as f64;

        let mean_of = |f: fn(&TrainingSample) -> f64| samples.iter().map(f).sum::<f64>() / n;
        let mean_speed = mean_of(|s| s.delivery_speed);

        let mut temperature = FeatureSums::new(mean_of(|s| s.temperature));
        let mut humidity = FeatureSums::new(mean_of(|s| s.humidity));
        let mut wind_speed = FeatureSums::new(mean_of(|s| s.wind_speed));
        let mut weight = FeatureSums::new(mean_of(|s| s.total_weight));
        let mut sum_speed_deviation = 0.0;

        for s in samples {
            let dy = s.delivery_speed - mean_speed;
            temperature.add(s.temperature, dy);
            humidity.add(s.humidity, dy);
            wind_speed.add(s.wind_speed, dy);
            weight.add(s.total_weight, dy);
            sum_speed_deviation += dy;
        }

        let beta_temperature = temperature.beta(sum_speed_deviation, count);
        let beta_humidity = humidity.beta(sum_speed_deviation, count);
        let beta_wind_speed = wind_speed.beta(sum_speed_deviation, count);
        let beta_weight = weight.beta(sum_speed_deviation, count);

        let intercept = mean_speed
            - beta_temperature * temperature.mean
            - beta_humidity * humidity.mean
            - beta_wind_speed * wind_speed.mean
            - beta_weight * weight.mean;

        // Weight is left out of the residual term
        let residual_sum: f64 = samples
            .iter()
            .map(|s| {
                s.delivery_speed
                    - intercept
                    - beta_temperature * s.temperature
                    - beta_humidity * s.humidity
                    - beta_wind_speed * s.wind_speed
            })
            .sum();

        let model = Self {
            intercept,
            beta_temperature,
            beta_humidity,
            beta_wind_speed,
            beta_weight,
            mean_residual: residual_sum / n,
            sample_count: count,
        };

        info!("Fitted speed model on {} samples", model.sample_count);
        debug!("Speed model coefficients: {:?}", model.coefficients());

        Ok(model)
    }

    /// Predict delivery speed (km/h)
    pub fn predict(
        &self,
        temperature: f64,
        humidity: f64,
        wind_speed: f64,
        total_weight: f64,
    ) -> f64 {
        self.intercept
            + self.beta_temperature * temperature
            + self.beta_humidity * humidity
            + self.beta_wind_speed * wind_speed
            + self.beta_weight * total_weight
            + self.mean_residual
    }

    /// Predict delivery speed for averaged conditions
    pub fn predict_conditions(&self, conditions: &ConditionAverages, total_weight: f64) -> f64 {
        self.predict(
            conditions.temperature,
            conditions.humidity,
            conditions.wind_speed,
            total_weight,
        )
    }

    /// `[intercept, β_temperature, β_humidity, β_wind_speed, β_weight, mean_residual]`
    pub fn coefficients(&self) -> [f64; COEFFICIENT_COUNT] {
        [
            self.intercept,
            self.beta_temperature,
            self.beta_humidity,
            self.beta_wind_speed,
            self.beta_weight,
            self.mean_residual,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(
        temperature: f64,
        humidity: f64,
        wind_speed: f64,
        total_weight: f64,
        delivery_speed: f64,
    ) -> TrainingSample {
        TrainingSample {
            temperature,
            humidity,
            wind_speed,
            total_weight,
            delivery_speed,
        }
    }

    #[test]
    fn test_empty_training_set() {
        assert_eq!(RegressionModel::fit(&[]), Err(ModelError::EmptyTrainingSet));
    }

    #[test]
    fn test_identical_samples() {
        let samples = vec![sample(10.0, 50.0, 5.0, 100.0, 40.0); 8];
        let model = RegressionModel::fit(&samples).unwrap();

        assert!((model.intercept - 40.0).abs() < 1e-9);
        assert_eq!(model.beta_temperature, 0.0);
        assert_eq!(model.beta_humidity, 0.0);
        assert_eq!(model.beta_wind_speed, 0.0);
        assert_eq!(model.beta_weight, 0.0);
        assert!(model.mean_residual.abs() < 1e-9);
        assert!((model.predict(10.0, 50.0, 5.0, 100.0) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_identical_fractional_samples() {
        let samples = vec![sample(3.3, 71.7, 0.1, 12.9, 57.3); 3];
        let model = RegressionModel::fit(&samples).unwrap();

        assert_eq!(model.beta_temperature, 0.0);
        assert_eq!(model.beta_humidity, 0.0);
        assert_eq!(model.beta_wind_speed, 0.0);
        assert_eq!(model.beta_weight, 0.0);
        assert!((model.intercept - 57.3).abs() < 1e-9);
    }

    #[test]
    fn test_large_identical_fractional_set() {
        for n in [34, 35, 1_000, 4_999] {
            let samples = vec![sample(3.3, 71.7, 0.1, 12.9, 57.3); n];
            let model = RegressionModel::fit(&samples).unwrap();

            assert_eq!(model.coefficients()[1..5], [0.0; 4], "n = {}", n);
            assert!((model.intercept - 57.3).abs() < 1e-9, "n = {}", n);
            assert_eq!(model.sample_count, n);
        }
    }

    #[test]
    fn test_centered_fit_matches_raw_formula() {
        let samples = vec![
            sample(-2.0, 40.0, 3.0, 100.0, 62.0),
            sample(4.0, 55.0, 8.0, 250.0, 51.0),
            sample(9.0, 70.0, 12.0, 400.0, 47.0),
            sample(15.0, 90.0, 6.0, 150.0, 58.0),
        ];
        let model = RegressionModel::fit(&samples).unwrap();

        let n = samples.len();
        let sum_t: f64 = samples.iter().map(|s| s.temperature).sum();
        let sum_y: f64 = samples.iter().map(|s| s.delivery_speed).sum();
        let sum_ty: f64 = samples.iter().map(|s| s.temperature * s.delivery_speed).sum();
        let sum_tt: f64 = samples.iter().map(|s| s.temperature * s.temperature).sum();
        let expected = calculate_beta(sum_t, sum_y, sum_ty, sum_tt, n);

        assert!((model.beta_temperature - expected).abs() < 1e-9);
    }

    #[test]
    fn test_single_feature_linear_relationship() {
        // speed = 60 - 2 * temperature, other features constant at zero
        let samples: Vec<_> = (0..5)
            .map(|i| {
                let t = i as f64 * 5.0;
                sample(t, 0.0, 0.0, 0.0, 60.0 - 2.0 * t)
            })
            .collect();
        let model = RegressionModel::fit(&samples).unwrap();

        assert!((model.beta_temperature + 2.0).abs() < 1e-9);
        assert!((model.intercept - 60.0).abs() < 1e-9);
        assert!(model.mean_residual.abs() < 1e-9);
        assert!((model.predict(7.0, 0.0, 0.0, 0.0) - 46.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_residual_excludes_weight() {
        // Weight perfectly predicts speed; the residual absorbs β_weight · mean(weight)
        let samples = vec![
            sample(0.0, 0.0, 0.0, 10.0, 50.0),
            sample(0.0, 0.0, 0.0, 20.0, 40.0),
            sample(0.0, 0.0, 0.0, 30.0, 30.0),
        ];
        let model = RegressionModel::fit(&samples).unwrap();

        assert!((model.beta_weight + 1.0).abs() < 1e-9);
        assert!((model.intercept - 60.0).abs() < 1e-9);
        assert!((model.mean_residual + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_coefficient_layout() {
        let model = RegressionModel {
            intercept: 1.0,
            beta_temperature: 2.0,
            beta_humidity: 3.0,
            beta_wind_speed: 4.0,
            beta_weight: 5.0,
            mean_residual: 6.0,
            sample_count: 1,
        };
        assert_eq!(model.coefficients(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(model.predict(1.0, 1.0, 1.0, 1.0), 21.0);
    }

    #[test]
    fn test_predict_conditions() {
        let model = RegressionModel {
            intercept: 50.0,
            beta_temperature: 0.5,
            beta_humidity: -0.1,
            beta_wind_speed: -1.0,
            beta_weight: -0.01,
            mean_residual: 0.0,
            sample_count: 4,
        };
        let conditions = ConditionAverages {
            temperature: 20.0,
            humidity: 50.0,
            wind_speed: 5.0,
            mean_pressure: 1000.0,
            sample_count: 3,
        };
        let speed = model.predict_conditions(&conditions, 100.0);
        assert!((speed - (50.0 + 10.0 - 5.0 - 5.0 - 1.0)).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_beta_zero_for_all_zero_feature(
            sum_y in -1e6f64..1e6,
            sum_xy in -1e6f64..1e6,
            n in 0usize..10_000,
        ) {
            prop_assert_eq!(calculate_beta(0.0, sum_y, sum_xy, 0.0, n), 0.0);
        }

        #[test]
        fn prop_identical_samples_fit_flat_model(
            temperature in -40.0f64..45.0,
            humidity in 0.0f64..100.0,
            wind_speed in 0.0f64..40.0,
            total_weight in 0.0f64..5000.0,
            delivery_speed in 1.0f64..150.0,
            n in 1usize..5000,
        ) {
            let single = sample(temperature, humidity, wind_speed, total_weight, delivery_speed);
            let samples = vec![single; n];
            let model = RegressionModel::fit(&samples).unwrap();

            prop_assert_eq!(model.beta_temperature, 0.0);
            prop_assert_eq!(model.beta_humidity, 0.0);
            prop_assert_eq!(model.beta_wind_speed, 0.0);
            prop_assert_eq!(model.beta_weight, 0.0);
            prop_assert!((model.intercept - delivery_speed).abs() < 1e-9);
            let predicted = model.predict(temperature, humidity, wind_speed, total_weight);
            prop_assert!((predicted - delivery_speed).abs() < 1e-9);
        }

        #[test]
        fn prop_constant_feature_has_zero_beta(
            x in -1000i32..1000,
            n in 1usize..500,
            y in -100i32..100,
        ) {
            let (x, y) = (x as f64, y as f64);
            let nf = n as f64;
            let beta = calculate_beta(nf * x, nf * y, nf * x * y, nf * x * x, n);
            prop_assert_eq!(beta, 0.0);
        }
    }
}
