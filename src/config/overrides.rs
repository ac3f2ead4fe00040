use crate::parallel::Backend;
use serde::Serialize;

/// Command-line values layered on top of every other configuration source
///
/// Unset fields are skipped during serialization so they never shadow a value
/// from the file or environment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    pub reduce: ReduceOverrides,
    pub sample: SampleOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReduceOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<Backend>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SampleOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self.reduce.threads.is_none()
            && self.reduce.backend.is_none()
            && self.sample.count.is_none()
            && self.sample.min.is_none()
            && self.sample.max.is_none()
            && self.sample.seed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_fields_are_skipped() {
        let value = serde_json::to_value(ConfigOverrides::default()).unwrap();
        assert_eq!(value, serde_json::json!({ "reduce": {}, "sample": {} }));
        assert!(ConfigOverrides::default().is_empty());
    }

    #[test]
    fn test_set_fields_are_nested() {
        let overrides = ConfigOverrides {
            reduce: ReduceOverrides {
                threads: Some(4),
                backend: Some(Backend::Rayon),
            },
            sample: SampleOverrides {
                count: Some(10),
                ..Default::default()
            },
        };

        let value = serde_json::to_value(&overrides).unwrap();
        assert_eq!(value["reduce"]["threads"], 4);
        assert_eq!(value["reduce"]["backend"], "rayon");
        assert_eq!(value["sample"]["count"], 10);
        assert!(value["sample"].get("min").is_none());
        assert!(!overrides.is_empty());
    }
}
