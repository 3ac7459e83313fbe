/// Marker trait for reducer state.
///
/// Cloned to produce new states and compared to detect changes.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
