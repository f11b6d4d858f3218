//! Scenario configuration with YAML schema and validation.
//!
//! Implements Poka-Yoke (mistake-proofing) through:
//! - Type-safe configuration structs
//! - Compile-time validation via serde
//! - Runtime semantic validation
//!
//! A scenario file selects which models run and with what parameters.
//! Every model section is optional, but at least one must be present.

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{ModelError, ModelResult};
use crate::models::{EoqInput, ProductionInput, QueueInput};

/// Top-level scenario configuration.
///
/// Loaded from YAML files with full schema validation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Scenario metadata.
    #[validate(nested)]
    #[serde(default)]
    pub scenario: ScenarioMeta,

    /// Production planning section.
    #[validate(nested)]
    pub production: Option<ProductionSection>,

    /// Inventory policy section.
    #[validate(nested)]
    pub inventory: Option<InventorySection>,

    /// Service queue section.
    #[validate(nested)]
    pub queueing: Option<QueueSection>,

    /// Chart sampling settings.
    #[validate(nested)]
    #[serde(default)]
    pub chart: ChartConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl ScenarioConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> ModelResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> ModelResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;

        // Poka-Yoke: validate all constraints
        config.validate()?;

        // Additional semantic validation
        config.validate_semantic()?;

        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> ScenarioConfigBuilder {
        ScenarioConfigBuilder::default()
    }

    /// Validate semantic constraints beyond schema.
    ///
    /// Every model section present must also pass its own input
    /// validation, so a bad parameter is rejected at load time rather
    /// than when the model runs.
    fn validate_semantic(&self) -> ModelResult<()> {
        if self.production.is_none() && self.inventory.is_none() && self.queueing.is_none() {
            return Err(ModelError::config(
                "scenario must enable at least one model section \
                 (production, inventory, or queueing)",
            ));
        }

        if let Some(production) = &self.production {
            production.to_input().validate()?;
        }
        if let Some(inventory) = &self.inventory {
            inventory.to_input().validate()?;
        }
        if let Some(queueing) = &self.queueing {
            queueing.to_input().validate()?;
        }

        Ok(())
    }

    /// Number of points sampled for each chart curve.
    #[must_use]
    pub const fn chart_samples(&self) -> usize {
        self.chart.samples
    }
}

impl Default for ScenarioConfig {
    /// The default scenario enables all three models with the classic
    /// workshop parameters.
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            scenario: ScenarioMeta::default(),
            production: Some(ProductionSection::default()),
            inventory: Some(InventorySection::default()),
            queueing: Some(QueueSection::default()),
            chart: ChartConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
///
/// Unlike [`ScenarioConfig::default`], a built configuration contains
/// exactly the sections that were set on the builder.
#[derive(Debug, Default)]
pub struct ScenarioConfigBuilder {
    production: Option<ProductionSection>,
    inventory: Option<InventorySection>,
    queueing: Option<QueueSection>,
    samples: Option<usize>,
}

impl ScenarioConfigBuilder {
    /// Set the production planning section.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // ProductionSection doesn't impl Copy
    pub fn production(mut self, section: ProductionSection) -> Self {
        self.production = Some(section);
        self
    }

    /// Set the inventory policy section.
    #[must_use]
    pub const fn inventory(mut self, section: InventorySection) -> Self {
        self.inventory = Some(section);
        self
    }

    /// Set the service queue section.
    #[must_use]
    pub const fn queueing(mut self, section: QueueSection) -> Self {
        self.queueing = Some(section);
        self
    }

    /// Set the chart sample count.
    #[must_use]
    pub const fn samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ScenarioConfig {
        let mut chart = ChartConfig::default();
        if let Some(samples) = self.samples {
            chart.samples = samples;
        }

        ScenarioConfig {
            schema_version: default_schema_version(),
            scenario: ScenarioMeta::default(),
            production: self.production,
            inventory: self.inventory,
            queueing: self.queueing,
            chart,
        }
    }
}

/// Scenario metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ScenarioMeta {
    /// Scenario name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Version.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Production planning parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductionSection {
    /// Profit per unit for each product.
    #[validate(length(min = 1))]
    pub profits: Vec<f64>,
    /// Resource usage per unit, one row per constraint.
    #[validate(length(min = 1))]
    pub constraint_coefficients: Vec<Vec<f64>>,
    /// Resource limit for each constraint.
    #[validate(length(min = 1))]
    pub constraint_limits: Vec<f64>,
}

impl Default for ProductionSection {
    fn default() -> Self {
        Self {
            profits: vec![40.0, 30.0],
            constraint_coefficients: vec![vec![2.0, 1.0], vec![1.0, 1.0]],
            constraint_limits: vec![100.0, 80.0],
        }
    }
}

impl ProductionSection {
    /// Convert to a solver input.
    #[must_use]
    pub fn to_input(&self) -> ProductionInput {
        ProductionInput::new(
            self.profits.clone(),
            self.constraint_coefficients.clone(),
            self.constraint_limits.clone(),
        )
    }
}

/// Inventory policy parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct InventorySection {
    /// Annual demand in units.
    pub annual_demand: f64,
    /// Fixed cost per order.
    pub order_cost: f64,
    /// Holding cost per unit per year.
    pub holding_cost: f64,
}

impl Default for InventorySection {
    fn default() -> Self {
        Self {
            annual_demand: 1000.0,
            order_cost: 50.0,
            holding_cost: 2.0,
        }
    }
}

impl InventorySection {
    /// Convert to a model input.
    #[must_use]
    pub const fn to_input(&self) -> EoqInput {
        EoqInput::new(self.annual_demand, self.order_cost, self.holding_cost)
    }
}

/// Service queue parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct QueueSection {
    /// Mean customer arrival rate (per unit time).
    pub arrival_rate: f64,
    /// Mean service rate (per unit time).
    pub service_rate: f64,
}

impl Default for QueueSection {
    fn default() -> Self {
        Self {
            arrival_rate: 2.0,
            service_rate: 3.0,
        }
    }
}

impl QueueSection {
    /// Convert to a model input.
    #[must_use]
    pub const fn to_input(&self) -> QueueInput {
        QueueInput::new(self.arrival_rate, self.service_rate)
    }
}

/// Chart sampling settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct ChartConfig {
    /// Number of points sampled per curve.
    #[validate(range(min = 2, max = 100_000))]
    #[serde(default = "default_chart_samples")]
    pub samples: usize,
}

const fn default_chart_samples() -> usize {
    100
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            samples: default_chart_samples(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ScenarioConfig::default();

        assert_eq!(config.schema_version, "1.0");
        assert!(config.production.is_some());
        assert!(config.inventory.is_some());
        assert!(config.queueing.is_some());
        assert_eq!(config.chart_samples(), 100);
    }

    #[test]
    fn test_default_workshop_parameters() {
        let config = ScenarioConfig::default();

        let production = config.production.unwrap();
        assert_eq!(production.profits, vec![40.0, 30.0]);
        assert_eq!(production.constraint_limits, vec![100.0, 80.0]);

        let inventory = config.inventory.unwrap();
        assert!((inventory.annual_demand - 1000.0).abs() < f64::EPSILON);
        assert!((inventory.order_cost - 50.0).abs() < f64::EPSILON);
        assert!((inventory.holding_cost - 2.0).abs() < f64::EPSILON);

        let queueing = config.queueing.unwrap();
        assert!((queueing.arrival_rate - 2.0).abs() < f64::EPSILON);
        assert!((queueing.service_rate - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_config_passes_validation() {
        let config = ScenarioConfig::default();
        assert!(config.validate_semantic().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ScenarioConfig::builder()
            .queueing(QueueSection {
                arrival_rate: 4.0,
                service_rate: 5.0,
            })
            .samples(50)
            .build();

        assert!(config.production.is_none());
        assert!(config.inventory.is_none());
        assert!(config.queueing.is_some());
        assert_eq!(config.chart_samples(), 50);
    }

    #[test]
    fn test_config_yaml_parse() {
        let yaml = r"
scenario:
  name: workshop
queueing:
  arrival_rate: 2.0
  service_rate: 3.0
";
        let config = ScenarioConfig::from_yaml(yaml);
        assert!(config.is_ok());

        let config = config.ok();
        assert!(config.is_some());
        assert_eq!(
            config.as_ref().and_then(|c| c.queueing).map(|q| q.arrival_rate),
            Some(2.0)
        );
    }

    #[test]
    fn test_config_yaml_all_sections() {
        let yaml = r"
schema_version: '1.0'
scenario:
  name: full workshop
  description: all three models
production:
  profits: [40.0, 30.0]
  constraint_coefficients:
    - [2.0, 1.0]
    - [1.0, 1.0]
  constraint_limits: [100.0, 80.0]
inventory:
  annual_demand: 1000.0
  order_cost: 50.0
  holding_cost: 2.0
queueing:
  arrival_rate: 2.0
  service_rate: 3.0
chart:
  samples: 200
";
        let config = ScenarioConfig::from_yaml(yaml);
        assert!(config.is_ok());

        let config = config.ok();
        assert_eq!(config.as_ref().map(ScenarioConfig::chart_samples), Some(200));
    }

    #[test]
    fn test_config_requires_model_section() {
        let yaml = r"
scenario:
  name: empty
chart:
  samples: 100
";
        let config = ScenarioConfig::from_yaml(yaml);
        assert!(config.is_err());

        let message = config.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(message.contains("at least one model section"));
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let yaml = r"
queueing:
  arrival_rate: 2.0
  service_rate: 3.0
turbo_mode: true
";
        let config = ScenarioConfig::from_yaml(yaml);
        assert!(config.is_err());
    }

    #[test]
    fn test_config_rejects_single_sample() {
        let yaml = r"
queueing:
  arrival_rate: 2.0
  service_rate: 3.0
chart:
  samples: 1
";
        let config = ScenarioConfig::from_yaml(yaml);
        assert!(config.is_err());
    }

    #[test]
    fn test_config_rejects_negative_demand() {
        let yaml = r"
inventory:
  annual_demand: -1000.0
  order_cost: 50.0
  holding_cost: 2.0
";
        let config = ScenarioConfig::from_yaml(yaml);
        assert!(config.is_err());

        let message = config.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(message.contains("annual_demand"));
    }

    #[test]
    fn test_config_accepts_overloaded_queue() {
        // An overloaded queue is a valid configuration; instability is a
        // model verdict, not a configuration fault.
        let yaml = r"
queueing:
  arrival_rate: 5.0
  service_rate: 3.0
";
        let config = ScenarioConfig::from_yaml(yaml);
        assert!(config.is_ok());
    }

    #[test]
    fn test_config_rejects_empty_profits() {
        let yaml = r"
production:
  profits: []
  constraint_coefficients:
    - [2.0, 1.0]
  constraint_limits: [100.0]
";
        let config = ScenarioConfig::from_yaml(yaml);
        assert!(config.is_err());
    }

    #[test]
    fn test_config_rejects_mismatched_limits() {
        let yaml = r"
production:
  profits: [40.0, 30.0]
  constraint_coefficients:
    - [2.0, 1.0]
    - [1.0, 1.0]
  constraint_limits: [100.0]
";
        let config = ScenarioConfig::from_yaml(yaml);
        assert!(config.is_err());
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = ScenarioConfig::load("/nonexistent/scenario.yaml");
        assert!(config.is_err());
    }

    #[test]
    fn test_section_to_input_round_trip() {
        let section = QueueSection::default();
        let input = section.to_input();
        assert!((input.arrival_rate - 2.0).abs() < f64::EPSILON);
        assert!((input.service_rate - 3.0).abs() < f64::EPSILON);

        let section = InventorySection::default();
        let input = section.to_input();
        assert!((input.annual_demand - 1000.0).abs() < f64::EPSILON);

        let section = ProductionSection::default();
        let input = section.to_input();
        assert_eq!(input.n_products(), 2);
        assert_eq!(input.n_constraints(), 2);
    }

    #[test]
    fn test_scenario_meta_default() {
        let meta = ScenarioMeta::default();
        assert!(meta.name.is_empty());
        // Rust Default for String is ""; serde fills "0.1.0" for a
        // missing field (via default_version)
        assert!(meta.version.is_empty());
    }

    #[test]
    fn test_scenario_meta_version_fills_from_yaml() {
        let yaml = r"
queueing:
  arrival_rate: 2.0
  service_rate: 3.0
";
        let config = ScenarioConfig::from_yaml(yaml);
        assert_eq!(
            config.ok().map(|c| c.scenario.version),
            Some("0.1.0".to_string())
        );
    }

    #[test]
    fn test_chart_config_default() {
        let chart = ChartConfig::default();
        assert_eq!(chart.samples, 100);
    }
}
