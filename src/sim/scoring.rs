//! Ten-pin scoring
//!
//! Frames hold raw knockdown counts; a strike is always stored as 10.
//! Strike and spare glyphs are a presentation concern, decided from the
//! predicates below.

use serde::{Deserialize, Serialize};

use crate::consts::{FRAME_COUNT, STRIKE};

/// Index of the tenth (last) frame
pub const LAST_FRAME: usize = FRAME_COUNT - 1;

/// One scoring frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub roll1: Option<u8>,
    pub roll2: Option<u8>,
    /// Only used in the tenth frame
    pub roll3: Option<u8>,
    /// Running total through this frame, once computable
    pub cumulative: Option<u32>,
}

impl Frame {
    fn first(&self) -> u32 {
        self.roll1.unwrap_or(0) as u32
    }

    fn second(&self) -> u32 {
        self.roll2.unwrap_or(0) as u32
    }

    fn third(&self) -> u32 {
        self.roll3.unwrap_or(0) as u32
    }

    /// Sum of all rolls, missing rolls counting as zero
    pub fn pinfall(&self) -> u32 {
        self.first() + self.second() + self.third()
    }
}

/// All ten pins on the first roll
pub fn frame_is_strike(frame: &Frame) -> bool {
    frame.roll1 == Some(STRIKE)
}

/// All ten pins across the first two rolls, without a strike
pub fn frame_is_spare(frame: &Frame) -> bool {
    frame.roll1 != Some(STRIKE) && frame.first() + frame.second() == STRIKE as u32
}

pub fn ten_first_is_strike(frame: &Frame) -> bool {
    frame.roll1 == Some(STRIKE)
}

pub fn ten_second_is_strike(frame: &Frame) -> bool {
    frame.roll2 == Some(STRIKE)
}

pub fn ten_second_is_spare(frame: &Frame) -> bool {
    frame_is_spare(frame)
}

pub fn ten_third_is_strike(frame: &Frame) -> bool {
    frame.roll3 == Some(STRIKE)
}

/// Ten empty frames
pub fn build_frames() -> [Frame; FRAME_COUNT] {
    [Frame::default(); FRAME_COUNT]
}

/// Result of recording a throw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowOutcome {
    Recorded {
        next_frame: usize,
        next_roll_in_frame: u8,
        /// A fresh rack of ten is needed before the next roll
        reset_rack: bool,
    },
    /// All ten frames are already resolved; nothing was written
    FrameAlreadyComplete,
}

/// Record `knocked` pins for the roll at (`current_frame`, `roll_in_frame`)
/// and recompute running totals.
pub fn record_throw(
    frames: &mut [Frame; FRAME_COUNT],
    current_frame: usize,
    roll_in_frame: u8,
    knocked: u8,
) -> ThrowOutcome {
    if current_frame >= FRAME_COUNT {
        return ThrowOutcome::FrameAlreadyComplete;
    }
    debug_assert!(knocked <= STRIKE, "knocked down {knocked} pins");
    debug_assert!(roll_in_frame <= 2, "roll_in_frame {roll_in_frame}");
    debug_assert!(
        roll_in_frame < 2 || current_frame == LAST_FRAME,
        "third roll outside the tenth frame"
    );

    let outcome = if current_frame == LAST_FRAME {
        record_tenth(&mut frames[current_frame], roll_in_frame, knocked)
    } else {
        record_regular(&mut frames[current_frame], current_frame, roll_in_frame, knocked)
    };

    recalculate_cumulative(frames);
    outcome
}

fn record_regular(frame: &mut Frame, index: usize, roll_in_frame: u8, knocked: u8) -> ThrowOutcome {
    if roll_in_frame == 0 {
        frame.roll1 = Some(knocked);
        if knocked == STRIKE {
            return ThrowOutcome::Recorded {
                next_frame: index + 1,
                next_roll_in_frame: 0,
                reset_rack: true,
            };
        }
        return ThrowOutcome::Recorded {
            next_frame: index,
            next_roll_in_frame: 1,
            reset_rack: false,
        };
    }

    frame.roll2 = Some(knocked);
    ThrowOutcome::Recorded {
        next_frame: index + 1,
        next_roll_in_frame: 0,
        reset_rack: true,
    }
}

/// Tenth frame: a strike or spare earns a third roll, and any roll that
/// clears the deck brings a fresh rack for the next one.
fn record_tenth(frame: &mut Frame, roll_in_frame: u8, knocked: u8) -> ThrowOutcome {
    match roll_in_frame {
        0 => {
            frame.roll1 = Some(knocked);
            ThrowOutcome::Recorded {
                next_frame: LAST_FRAME,
                next_roll_in_frame: 1,
                reset_rack: knocked == STRIKE,
            }
        }
        1 => {
            frame.roll2 = Some(knocked);
            let first_strike = ten_first_is_strike(frame);
            let spare = ten_second_is_spare(frame);
            if first_strike || spare {
                // Strike after strike, or a spare, clears the deck
                let deck_cleared = spare || knocked == STRIKE;
                ThrowOutcome::Recorded {
                    next_frame: LAST_FRAME,
                    next_roll_in_frame: 2,
                    reset_rack: deck_cleared,
                }
            } else {
                ThrowOutcome::Recorded {
                    next_frame: FRAME_COUNT,
                    next_roll_in_frame: 0,
                    reset_rack: true,
                }
            }
        }
        _ => {
            frame.roll3 = Some(knocked);
            ThrowOutcome::Recorded {
                next_frame: FRAME_COUNT,
                next_roll_in_frame: 0,
                reset_rack: true,
            }
        }
    }
}

/// Recompute `cumulative` for every frame that has been started.
///
/// Stops at the first frame without a first roll; later frames are cleared.
pub fn recalculate_cumulative(frames: &mut [Frame; FRAME_COUNT]) {
    let mut running = 0u32;
    let mut scoring = true;

    for i in 0..FRAME_COUNT {
        if frames[i].roll1.is_none() {
            scoring = false;
        }
        if !scoring {
            frames[i].cumulative = None;
            continue;
        }

        let frame = &frames[i];
        let score = if i == LAST_FRAME {
            frame.pinfall()
        } else if frame_is_strike(frame) {
            STRIKE as u32 + strike_bonus(frames, i)
        } else if frame_is_spare(frame) {
            STRIKE as u32 + spare_bonus(frames, i)
        } else {
            frame.first() + frame.second()
        };

        running += score;
        frames[i].cumulative = Some(running);
    }
}

/// Next two rolls after a strike in frame `index`.
///
/// When the following frame is also a strike the second bonus roll comes
/// from the frame after it, except when the following frame is the tenth,
/// whose own second roll is used.
pub fn strike_bonus(frames: &[Frame; FRAME_COUNT], index: usize) -> u32 {
    let Some(next) = frames.get(index + 1) else {
        return 0;
    };

    if frame_is_strike(next) {
        let second = if index + 1 == LAST_FRAME {
            next.second()
        } else {
            frames.get(index + 2).map(Frame::first).unwrap_or(0)
        };
        STRIKE as u32 + second
    } else {
        next.first() + next.second()
    }
}

/// Next roll after a spare in frame `index`
pub fn spare_bonus(frames: &[Frame; FRAME_COUNT], index: usize) -> u32 {
    frames.get(index + 1).map(Frame::first).unwrap_or(0)
}

/// Frames plus the position of the next roll
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scorecard {
    pub frames: [Frame; FRAME_COUNT],
    /// 0..=9 while playing, 10 once the tenth frame is resolved
    pub current_frame: usize,
    /// 0, 1, or 2 (tenth frame bonus roll)
    pub roll_in_frame: u8,
}

impl Scorecard {
    pub fn new() -> Self {
        Self {
            frames: build_frames(),
            current_frame: 0,
            roll_in_frame: 0,
        }
    }

    /// Record a throw and advance the roll position
    pub fn record(&mut self, knocked: u8) -> ThrowOutcome {
        let outcome = record_throw(
            &mut self.frames,
            self.current_frame,
            self.roll_in_frame,
            knocked,
        );

        match outcome {
            ThrowOutcome::Recorded {
                next_frame,
                next_roll_in_frame,
                ..
            } => {
                log::info!(
                    "Frame {} roll {}: {} pins (total {})",
                    self.current_frame + 1,
                    self.roll_in_frame + 1,
                    knocked,
                    self.total()
                );
                self.current_frame = next_frame;
                self.roll_in_frame = next_roll_in_frame;
            }
            ThrowOutcome::FrameAlreadyComplete => {
                log::warn!("Throw of {} pins ignored: game already complete", knocked);
            }
        }

        outcome
    }

    pub fn is_game_over(&self) -> bool {
        self.current_frame >= FRAME_COUNT
    }

    /// Latest running total
    pub fn total(&self) -> u32 {
        self.frames
            .iter()
            .rev()
            .find_map(|f| f.cumulative)
            .unwrap_or(0)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Scorecard {
    fn default() -> Self {
        Self::new()
    }
}
