/// Marker trait for events fed to a reducer: user input, provider
/// responses, lifecycle changes.
pub trait Intent: Send + 'static {}
