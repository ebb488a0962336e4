//! Synthetic data generation.
//!
//! [`make_data`] builds a tree of random [`Person`] records. Each argument
//! is the fan-out of one level: `make_data(&[3, 4])` returns three records,
//! each carrying four leaf children.

mod names;

use log::info;
use rand::Rng;

pub use names::name_token;

use crate::error::Error;
use crate::model::Person;
use crate::model::Record;
use crate::model::Status;

/// Draws one random person.
///
/// Age is in `0..30`, visits and progress in `0..100`. The status comes from a
/// single uniform sample, see [`Status::from_chance`].
pub fn new_person<R: Rng + ?Sized>(rng: &mut R) -> Person {
    let status_chance: f64 = rng.random();
    Person {
        first_name: name_token(rng),
        last_name: name_token(rng),
        age: (rng.random::<f64>() * 30.0).floor() as u32,
        visits: (rng.random::<f64>() * 100.0).floor() as u32,
        progress: (rng.random::<f64>() * 100.0).floor() as u32,
        status: Status::from_chance(status_chance),
    }
}

/// Generates a record tree using the thread-local RNG.
///
/// An empty `lens` returns an empty vector.
pub fn make_data(lens: &[usize]) -> Vec<Record> {
    make_data_with(&mut rand::rng(), lens)
}

/// Generates a record tree from the given RNG.
pub fn make_data_with<R: Rng + ?Sized>(rng: &mut R, lens: &[usize]) -> Vec<Record> {
    let data = make_level(rng, lens, 0);
    info!(
        "Generated {} records over {} levels",
        data.iter().map(Record::count).sum::<usize>(),
        data.iter().map(Record::depth).max().unwrap_or(0)
    );
    data
}

fn make_level<R: Rng + ?Sized>(rng: &mut R, lens: &[usize], depth: usize) -> Vec<Record> {
    let Some(&len) = lens.get(depth) else {
        return Vec::new();
    };
    (0..len)
        .map(|_| {
            let person = new_person(rng);
            // A zero length below ends the tree at this level.
            let sub_rows = match lens.get(depth + 1) {
                Some(&next) if next > 0 => Some(make_level(rng, lens, depth + 1)),
                _ => None,
            };
            Record { person, sub_rows }
        })
        .collect()
}

/// Parses a comma-separated list of level lengths, e.g. `"20,3"`.
///
/// Negative and non-integer entries are rejected.
pub fn parse_lengths(input: &str) -> Result<Vec<usize>, Error> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }
    input
        .split(',')
        .map(|piece| {
            let piece = piece.trim();
            piece.parse::<usize>().map_err(|_| {
                let message = match piece.parse::<f64>() {
                    Ok(n) if n < 0.0 => format!("'{}' is negative", piece),
                    Ok(_) => format!("'{}' is not an integer", piece),
                    Err(_) => format!("'{}' is not a number", piece),
                };
                Error::invalid_argument("lengths", message)
            })
        })
        .collect()
}
