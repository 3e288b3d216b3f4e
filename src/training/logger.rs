//! Training progress logging.

/// How much training progress to report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Progress goes to the `debug` log level only.
    #[default]
    Silent,
    /// Progress goes to the `info` log level.
    Info,
}

/// Emits training progress through the `log` facade.
#[derive(Clone, Copy, Debug)]
pub struct TrainingLogger {
    verbosity: Verbosity,
}

impl TrainingLogger {
    /// Create a logger at the given verbosity.
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Report the start of a fit.
    pub fn start_training(&self, model: &str, n_trees: usize, n_samples: usize) {
        self.emit(format!(
            "training {model}: {n_trees} tree(s) on {n_samples} samples"
        ));
    }

    /// Report the end of a fit.
    pub fn finish_training(&self, model: &str, n_nodes: usize) {
        self.emit(format!("trained {model}: {n_nodes} nodes total"));
    }

    fn emit(&self, message: String) {
        match self.verbosity {
            Verbosity::Silent => log::debug!("{message}"),
            Verbosity::Info => log::info!("{message}"),
        }
    }
}
