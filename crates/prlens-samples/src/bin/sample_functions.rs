// SPDX-License-Identifier: Apache-2.0

//! Prints the results of the numeric samples.

use anyhow::Result;
use prlens_samples::{calculate_area, factorial, find_max, is_prime, power, square_root};

fn main() -> Result<()> {
    let numbers = [3, 1, 4, 1, 5, 9];

    println!("Area of circle with radius 5: {}", calculate_area(5.0));
    println!("2^10 = {}", power(2, 10)?);
    println!("Square root of 16: {:?}", square_root(16.0)?);
    println!("5! = {}", factorial(5)?);
    println!("Is 17 prime? {}", is_prime(17));
    println!("Max of {numbers:?}: {}", find_max(&numbers)?);
    Ok(())
}
