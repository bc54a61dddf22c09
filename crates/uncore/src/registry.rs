use crate::{MonitorError, MonitoringConfig};

/// The monitoring units available for one CPU family
pub struct Architecture {
    name: &'static str,
    configs: Vec<Box<dyn MonitoringConfig>>,
}

impl Architecture {
    /// Creates an architecture with no monitoring configs
    pub fn new(name: &'static str) -> Self {
        Architecture {
            name,
            configs: Vec::new(),
        }
    }

    /// Human-readable architecture name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Register a monitoring config
    pub fn add_config<C>(&mut self, config: C)
    where
        C: MonitoringConfig + 'static,
    {
        self.configs.push(Box::new(config));
    }

    /// All registered configs, in registration order
    pub fn configs(&self) -> &[Box<dyn MonitoringConfig>] {
        &self.configs
    }

    /// Mutable access to the config at `index`
    pub fn config_mut(&mut self, index: usize) -> Option<&mut Box<dyn MonitoringConfig>> {
        self.configs.get_mut(index)
    }

    /// Looks up a config by name, ignoring ASCII case
    pub fn find(&mut self, name: &str) -> Result<&mut Box<dyn MonitoringConfig>, MonitorError> {
        self.configs
            .iter_mut()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| MonitorError::UnknownConfig(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MonitorState, UpdateResults};
    use msr::{MemoryRegisterFile, RegisterAccess};

    struct Dummy {
        name: &'static str,
        state: MonitorState,
    }

    impl MonitoringConfig for Dummy {
        fn name(&self) -> &'static str {
            self.name
        }

        fn columns(&self) -> &'static [&'static str] {
            &["A"]
        }

        fn help_text(&self) -> &'static str {
            "A - always one"
        }

        fn state(&self) -> MonitorState {
            self.state
        }

        fn initialize(&mut self, _regs: &mut dyn RegisterAccess) -> Result<(), MonitorError> {
            self.state = MonitorState::Programmed;
            Ok(())
        }

        fn update(
            &mut self,
            _regs: &mut dyn RegisterAccess,
            _factor: f64,
        ) -> Result<UpdateResults, MonitorError> {
            self.state = MonitorState::Sampling;
            Ok(UpdateResults {
                unit_metrics: None,
                overall_metrics: vec!["1".to_string()],
            })
        }
    }

    fn dummy(name: &'static str) -> Dummy {
        Dummy {
            name,
            state: MonitorState::Uninitialized,
        }
    }

    #[test]
    fn test_configs_iterated_uniformly() {
        let mut arch = Architecture::new("Test");
        arch.add_config(dummy("First"));
        arch.add_config(dummy("Second"));

        let mut regs = MemoryRegisterFile::new();
        for index in 0..arch.configs().len() {
            let config = arch.config_mut(index).unwrap();
            config.initialize(&mut regs).unwrap();
            let results = config.update(&mut regs, 1.0).unwrap();
            assert_eq!(results.overall_metrics.len(), config.columns().len());
        }

        assert!(arch
            .configs()
            .iter()
            .all(|c| c.state() == MonitorState::Sampling));
        assert_eq!(arch.name(), "Test");
    }

    #[test]
    fn test_find_by_name() {
        let mut arch = Architecture::new("Test");
        arch.add_config(dummy("All Requests"));

        assert_eq!(arch.find("all requests").unwrap().name(), "All Requests");
        match arch.find("missing") {
            Err(MonitorError::UnknownConfig(name)) => assert_eq!(name, "missing"),
            _ => panic!("Expected UnknownConfig error"),
        }
        assert!(arch.config_mut(1).is_none());
    }
}
