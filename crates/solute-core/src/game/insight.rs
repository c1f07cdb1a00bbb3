//! Data-insight puzzles: a random dataset the player interprets.

use rand::Rng;
use serde::Serialize;

pub const POINTS: u32 = 5;
pub const ROWS: usize = 20;

const CATEGORY_SETS: [[&str; 4]; 3] = [
  ["Red", "Blue", "Green", "Yellow"],
  ["Apple", "Banana", "Orange", "Grape"],
  ["Q1", "Q2", "Q3", "Q4"],
];
const VALUE_MIN: usize = 10;
const VALUE_MAX: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Row {
  pub category: &'static str,
  pub value:    u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
  pub rows: Vec<Row>,
}

impl Dataset {
  /// Twenty rows cycling through one category set, with values drawn
  /// without replacement from `10..100`.
  pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
    let set = CATEGORY_SETS[rng.random_range(0..CATEGORY_SETS.len())];
    let rows = rand::seq::index::sample(rng, VALUE_MAX - VALUE_MIN, ROWS)
      .into_iter()
      .enumerate()
      .map(|(i, offset)| Row { category: set[i % set.len()], value: (VALUE_MIN + offset) as u32 })
      .collect();
    Self { rows }
  }

  pub fn to_csv(&self) -> String {
    let mut out = String::from("Category,Value\n");
    for row in &self.rows {
      out.push_str(&format!("{},{}\n", row.category, row.value));
    }
    out
  }

  /// Per-category sums in first-seen order.
  pub fn totals(&self) -> Vec<(&'static str, u32)> {
    let mut totals: Vec<(&'static str, u32)> = Vec::new();
    for row in &self.rows {
      match totals.iter_mut().find(|(c, _)| *c == row.category) {
        Some((_, sum)) => *sum += row.value,
        None => totals.push((row.category, row.value)),
      }
    }
    totals
  }

  pub fn max_value(&self) -> u32 { self.rows.iter().map(|r| r.value).max().unwrap_or(0) }
}

pub fn prompt(dataset: &Dataset, guess: &str) -> String {
  let guess = guess.trim();
  let guess_line = if guess.is_empty() {
    String::new()
  } else {
    format!("\nThe player's guess: {guess}\nSay briefly whether the guess holds up.\n")
  };
  format!(
    "You are a data detective.\n\nDataset:\n{csv}\nWhat hidden story, pattern, or insight is in \
     this data?\nBe intellectual and fun; explain it like telling a story.\n{guess_line}",
    csv = dataset.to_csv(),
  )
}
