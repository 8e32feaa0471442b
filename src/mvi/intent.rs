/// Marker trait for intent objects.
///
/// Intents are user actions (next page) or system events (a fetch settled).
pub trait Intent: Send + 'static {}
