/// Marker trait for state objects produced by a [`super::Reducer`].
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
