use shapeassist_events::InteractOptions;

/// Commands the canvas must honour. Its events arrive separately, on an
/// [`EventBus`](shapeassist_events::EventBus) of
/// [`CanvasEvent`](shapeassist_events::CanvasEvent)s.
pub trait Canvas: Send + Sync {
    /// Start or stop point collection.
    fn interact(&self, options: InteractOptions);

    /// Abort whatever tool is currently active.
    fn cancel(&self);
}
