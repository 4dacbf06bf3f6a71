/// Prints completion percentages for a known amount of work
///
/// A line is printed every `max(1, total / 100)` units, so a run prints
/// roughly a hundred lines no matter how large it is.
#[derive(Debug, Clone)]
pub struct Progress {
    total: u64,
    step: u64,
    completed: u64,
}

impl Progress {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            step: (total / 100).max(1),
            completed: 0,
        }
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// Records one finished unit
    ///
    /// Returns the printed percentage when this unit hit a sampling point.
    pub fn increase(&mut self) -> Option<u64> {
        self.completed += 1;
        if self.total == 0 || self.completed % self.step != 0 {
            return None;
        }

        let percent = self.completed * 100 / self.total;
        println!("{}%", percent);
        Some(percent)
    }
}
