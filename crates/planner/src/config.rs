use validator::Validate;

/// Parameters for one generation run, fixed for its whole duration.
#[derive(Debug, Clone, Validate)]
pub struct GenerationConfig {
    #[validate(range(min = 1))]
    pub days_to_generate: u32,
    pub allow_staple_repetition: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            days_to_generate: 7,
            allow_staple_repetition: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GenerationConfig::default();
        assert_eq!(config.days_to_generate, 7);
        assert!(config.allow_staple_repetition);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_days_rejected() {
        let config = GenerationConfig {
            days_to_generate: 0,
            ..GenerationConfig::default()
        };

        assert!(config.validate().is_err());
    }
}
