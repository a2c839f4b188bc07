//! Lending engine: who may borrow what, and until when

pub mod calendar;
pub mod clock;
pub mod eligibility;
pub mod isbn;
pub mod policy;

pub use clock::{Clock, FixedClock, SystemClock};
pub use eligibility::{
    EligibilityEvaluator, LoanOutcome, LoanReceipt, LoanRefusal, RefusalKind, RefusalReason,
};
pub use policy::LoanPolicy;
