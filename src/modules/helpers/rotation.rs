use std::time::Duration;

use log::info;
use tokio::time::{interval, MissedTickBehavior};

/// Cycles through `len` boards, one step per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rotation {
    len: usize,
    index: usize,
}

impl Rotation {
    pub fn new(len: usize) -> Rotation {
        Rotation { len, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// nothing to rotate through with zero or one board
    pub fn rotates(&self) -> bool {
        self.len > 1
    }

    /// advance to the next board, wrapping around at the end
    pub fn tick(&mut self) -> usize {
        if self.rotates() {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }
}

/// # rotate through the boards
/// show the current board, then advance every `period` for `cycles` full
/// rotations. a single board is shown once, no boards shows nothing.
pub async fn rotate_boards<T, F>(boards: &[T], period: Duration, cycles: usize, mut on_show: F)
where
    F: FnMut(usize, &T),
{
    let mut rotation = Rotation::new(boards.len());
    let first = match boards.first() {
        Some(board) => board,
        None => {
            info!(target:"helpers/rotation:rotate_boards", "no boards to show");
            return;
        }
    };

    on_show(0, first);
    if !rotation.rotates() {
        return;
    }

    let mut ticker = interval(period.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick completes immediately
    ticker.tick().await;

    for _ in 0..boards.len() * cycles {
        ticker.tick().await;
        let index = rotation.tick();
        on_show(index, &boards[index]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_after_len_ticks() {
        for len in 2..6 {
            let mut rotation = Rotation::new(len);
            let seen: Vec<usize> = (0..len).map(|_| rotation.tick()).collect();

            assert_eq!(rotation.index(), 0);
            assert_eq!(seen.last(), Some(&0));
            assert_eq!(seen[0], 1);
        }
    }

    #[test]
    fn never_moves_with_one_or_no_boards() {
        for len in [0, 1] {
            let mut rotation = Rotation::new(len);
            for _ in 0..5 {
                assert_eq!(rotation.tick(), 0);
            }
            assert!(!rotation.rotates());
        }
    }

    #[tokio::test]
    async fn shows_every_board_per_cycle() {
        let boards = ["Spa", "Monza", "Imola"];
        let mut shown = Vec::new();

        rotate_boards(&boards, Duration::from_millis(1), 2, |_, board| shown.push(*board)).await;
        assert_eq!(shown, vec!["Spa", "Monza", "Imola", "Spa", "Monza", "Imola", "Spa"]);
    }

    #[tokio::test]
    async fn single_board_is_shown_once() {
        let mut shown = 0;
        rotate_boards(&["Spa"], Duration::from_millis(1), 3, |_, _| shown += 1).await;
        assert_eq!(shown, 1);

        rotate_boards::<&str, _>(&[], Duration::from_millis(1), 3, |_, _| shown += 1).await;
        assert_eq!(shown, 1);
    }
}
