use fragbind::engine::config::EstimationMethod;

pub struct DefaultsConfig {
    pub method: EstimationMethod,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            method: EstimationMethod::Variational,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}
