//! Vectoring engine
//!
//! The shift-add rotation loop plus its result types. Stateless between
//! calls: all working registers live on the stack of a single conversion,
//! so one shared angle table serves any number of concurrent callers.

mod vectoring;


pub use vectoring::{rotate, Polar};
