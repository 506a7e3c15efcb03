//! Replaceable precondition checks
//!
//! Contract checks in the core report failures through a single hook. By
//! default the hook logs the violation and panics, which terminates the
//! coordinating thread. Test harnesses and lenient hosts swap the hook to
//! capture or log violations instead.
//!
//! Hooks are installed per coordinating thread, like the dependency map.
//!
//! ```ignore
//! let (bridge, violations) = preconditions::expect_violation(|| {
//!     StitchObservable::new(Stitch::new(&NOT_OBSERVABLE))
//! });
//! assert_eq!(violations.len(), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use stitch_domain::ContractViolation;
use tracing::error;

/// Handler invoked with every reported violation
pub type PreconditionHook = Rc<dyn Fn(&ContractViolation)>;

thread_local! {
    static HOOK: RefCell<Option<PreconditionHook>> = const { RefCell::new(None) };
}

/// Default handler: log, then panic
pub fn fatal_hook(violation: &ContractViolation) {
    error!(location = %violation.location, "{}", violation.message);
    panic!("{violation}");
}

/// Lenient handler: log and continue
pub fn logging_hook(violation: &ContractViolation) {
    error!(location = %violation.location, "{}", violation.message);
}

/// Replace this thread's hook, returning the previously installed one
pub fn set_hook(hook: impl Fn(&ContractViolation) + 'static) -> Option<PreconditionHook> {
    HOOK.with(|slot| slot.borrow_mut().replace(Rc::new(hook)))
}

/// Restore the default (fatal) hook, returning the removed one
pub fn reset_hook() -> Option<PreconditionHook> {
    replace_hook(None)
}

/// Install `hook` as-is (`None` selects the fatal default)
///
/// Used to put back a hook previously returned by [`set_hook`].
pub fn replace_hook(hook: Option<PreconditionHook>) -> Option<PreconditionHook> {
    HOOK.with(|slot| std::mem::replace(&mut *slot.borrow_mut(), hook))
}

/// Report `violation` through the current hook
pub fn report(violation: &ContractViolation) {
    // Clone out of the slot so a hook may itself swap hooks.
    let hook = HOOK.with(|slot| slot.borrow().clone());
    match hook {
        Some(hook) => hook(violation),
        None => fatal_hook(violation),
    }
}

/// Check `condition`, reporting a violation built from `message` when false
///
/// Returns `condition` so callers can bail out when a lenient hook lets
/// execution continue.
#[track_caller]
pub fn precondition(condition: bool, message: impl FnOnce() -> String) -> bool {
    if !condition {
        report(&ContractViolation::new(message()));
    }
    condition
}

/// Run `f` with a capturing hook, returning its result and every violation
///
/// The previous hook is restored afterwards, even if `f` panics.
pub fn expect_violation<R>(f: impl FnOnce() -> R) -> (R, Vec<ContractViolation>) {
    struct Restore(Option<PreconditionHook>);

    impl Drop for Restore {
        fn drop(&mut self) {
            replace_hook(self.0.take());
        }
    }

    let captured: Rc<RefCell<Vec<ContractViolation>>> = Rc::default();
    let sink = Rc::clone(&captured);
    let _restore = Restore(set_hook(move |violation| {
        sink.borrow_mut().push(violation.clone());
    }));

    let result = f();
    let violations = captured.borrow().clone();
    (result, violations)
}
