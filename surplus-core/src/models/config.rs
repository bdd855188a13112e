/// Diagrams are computed on uniform grids. This config describes their resolution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SamplingConfig {
    /// The quantity step used for resampling curves, integrating them and
    /// searching for the welfare optimum.
    pub step: f64,
    /// The number of evenly spaced quantities drawn across the visible x range.
    pub plot_samples: usize,
}

impl SamplingConfig {
    /// The default quantity step
    pub const STEP: f64 = 1e-3;
    /// The default number of plotted samples
    pub const PLOT_SAMPLES: usize = 501;
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            step: Self::STEP,
            plot_samples: Self::PLOT_SAMPLES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let config = serde_json::from_str::<SamplingConfig>(r#"{ "step": 0.01 }"#).unwrap();
        assert_eq!(config.step, 0.01);
        assert_eq!(config.plot_samples, SamplingConfig::PLOT_SAMPLES);
    }
}
