//! Macros for wiring events to reactions.

/// Generate `Event` implementations routing each event type to a method of
/// a state trait.
///
/// Methods not listed keep whatever default the trait gives them, normally
/// `Outcome::UnconsumedEvent`.
///
/// For a `dyn Trait` target the generated `deliver` takes
/// `&mut (dyn Trait + 'static)`, matching the object lifetime of the impl
/// header. Concrete state types are accepted as well.
///
/// # Example
///
/// ```
/// use reactive_fsm::core::{Outcome, State};
/// use reactive_fsm::reactions;
///
/// pub struct Open;
/// pub struct Close;
///
/// pub trait Door: State + Send {
///     fn on_open(&mut self, _ev: &Open) -> Outcome {
///         Outcome::UnconsumedEvent
///     }
///
///     fn on_close(&mut self, _ev: &Close) -> Outcome {
///         Outcome::UnconsumedEvent
///     }
/// }
///
/// reactions! {
///     dyn Door {
///         Open => on_open,
///         Close => on_close,
///     }
/// }
/// ```
#[macro_export]
macro_rules! reactions {
    (
        dyn $state:path {
            $($event:ty => $method:ident),* $(,)?
        }
    ) => {
        $(
            impl $crate::core::Event<dyn $state> for $event {
                fn deliver(&self, state: &mut (dyn $state + 'static)) -> $crate::core::Outcome {
                    state.$method(self)
                }
            }
        )*
    };
    (
        $target:ty {
            $($event:ty => $method:ident),* $(,)?
        }
    ) => {
        $(
            impl $crate::core::Event<$target> for $event {
                fn deliver(&self, state: &mut $target) -> $crate::core::Outcome {
                    state.$method(self)
                }
            }
        )*
    };
}
