use crate::padding::PaddingMode;
use crate::parallel::ExecutionStrategy;

/// Per-call settings shared by every filter.
///
/// # Examples
///
/// ```
/// use kernelkit_imgproc::filter::FilterConfig;
/// use kernelkit_imgproc::padding::PaddingMode;
/// use kernelkit_imgproc::parallel::ExecutionStrategy;
///
/// let config = FilterConfig::default()
///     .with_border(PaddingMode::Reflect101)
///     .with_strategy(ExecutionStrategy::Serial);
///
/// assert_eq!(config.border, PaddingMode::Reflect101);
/// assert_eq!(config.strategy, ExecutionStrategy::Serial);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// How neighborhoods are sampled past the image edges. Defaults to edge replication.
    pub border: PaddingMode,
    /// How rows are scheduled on threads. Defaults to [`ExecutionStrategy::Auto`].
    pub strategy: ExecutionStrategy,
}

impl FilterConfig {
    /// Set the border mode.
    pub fn with_border(mut self, border: PaddingMode) -> Self {
        self.border = border;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}
