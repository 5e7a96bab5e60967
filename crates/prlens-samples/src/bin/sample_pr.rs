// SPDX-License-Identifier: Apache-2.0

//! Prints the results of the basic arithmetic samples.

use anyhow::Result;
use prlens_samples::{add, divide, multiply, subtract};

fn main() -> Result<()> {
    println!("5 + 3 = {}", add(5, 3)?);
    println!("10 - 4 = {}", subtract(10, 4)?);
    println!("6 * 7 = {}", multiply(6, 7)?);
    println!("20 / 4 = {:?}", divide(20, 4)?);
    Ok(())
}
