// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # prlens samples
//!
//! Small utility functions that double as review fixtures for prlens.
//!
//! Each function mirrors a demo snippet that carries a planted defect for the
//! reviewer to flag (unchecked division, unbounded recursion, query string
//! interpolation, shell execution, leaked handles, hidden shared state). The
//! versions here are repaired: failures are typed [`SampleError`] values and
//! state is passed explicitly.
//!
//! ## Modules
//!
//! - [`arithmetic`] - add, subtract, multiply, divide, average
//! - [`numeric`] - area, power, square root, factorial, primality, maximum
//! - [`hazards`] - repaired versions of the unsafe patterns

pub use arithmetic::{add, calculate_average, divide, double, multiply, subtract};
pub use error::SampleError;
pub use hazards::{
    Counter, Credentials, UserQuery, append_to_list, get_user, read_config, risky_operation,
    run_user_command,
};
pub use numeric::{calculate_area, factorial, find_max, is_prime, power, square_root};

/// Convenience Result type for sample operations.
pub type Result<T> = std::result::Result<T, SampleError>;

pub mod arithmetic;
pub mod error;
pub mod hazards;
pub mod numeric;
