use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    #[default]
    Linear,
    Step,
    /// Values are stored as `[in_tangent, value, out_tangent]` triples.
    CubicSpline,
}

/// How far the cursor scans linearly before falling back to binary search.
const MAX_SCAN_OFFSET: usize = 3;

/// Remembers the keyframe found by the previous sample of a track.
///
/// Playback usually moves forward by less than one keyframe per frame, so the
/// next lookup is almost always at or just after `last_index`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

/// Keyframe times plus values of one animated property.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    /// For `CubicSpline`, `times.len() * 3` entries.
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    #[must_use]
    pub fn linear(times: Vec<f32>, values: Vec<T>) -> Self {
        Self::new(times, values, InterpolationMode::Linear)
    }

    /// Time of the last keyframe, or 0 for an empty track.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Checks that the track can be sampled.
    ///
    /// A track needs at least one keyframe, finite non-decreasing times, and
    /// one value per keyframe (three for cubic splines).
    pub fn check(&self) -> std::result::Result<(), String> {
        if self.times.is_empty() {
            return Err("track has no keyframes".to_string());
        }
        let stride = match self.interpolation {
            InterpolationMode::CubicSpline => 3,
            _ => 1,
        };
        if self.values.len() != self.times.len() * stride {
            return Err(format!(
                "expected {} values for {} keyframes, found {}",
                self.times.len() * stride,
                self.times.len(),
                self.values.len()
            ));
        }
        if self.times.iter().any(|t| !t.is_finite()) {
            return Err("keyframe times must be finite".to_string());
        }
        if self.times.windows(2).any(|w| w[1] < w[0]) {
            return Err("keyframe times must be non-decreasing".to_string());
        }
        Ok(())
    }

    /// Samples the track with a binary search over keyframe times.
    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        if self.times.is_empty() {
            return T::default();
        }
        let next_idx = self.times.partition_point(|&t| t <= time);
        self.sample_at_frame(next_idx.saturating_sub(1), time)
    }

    /// Samples the track, starting the keyframe search at `cursor`.
    ///
    /// Scans up to [`MAX_SCAN_OFFSET`] keyframes forward or backward from the
    /// cached index; larger jumps (loop wrap, scrubbing) fall back to a binary
    /// search. The cursor is updated to the keyframe that was used.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> T {
        let len = self.times.len();
        if len == 0 {
            return T::default();
        }
        // Static data
        if len == 1 {
            cursor.last_index = 0;
            return self.value_at(0);
        }

        let i = cursor.last_index.min(len - 1);
        let found = if time >= self.times[i] {
            // Forward: find idx with times[idx] <= time < times[idx + 1]
            (i..=(i + MAX_SCAN_OFFSET).min(len - 1))
                .find(|&idx| idx == len - 1 || time < self.times[idx + 1])
        } else {
            // Backward: time < times[i]
            (i.saturating_sub(MAX_SCAN_OFFSET)..i)
                .rev()
                .find(|&idx| time >= self.times[idx])
        };

        let index = found.unwrap_or_else(|| {
            let next_idx = self.times.partition_point(|&t| t <= time);
            next_idx.saturating_sub(1)
        });
        cursor.last_index = index;

        self.sample_at_frame(index, time)
    }

    fn value_at(&self, index: usize) -> T {
        let slot = match self.interpolation {
            InterpolationMode::CubicSpline => index * 3 + 1,
            _ => index,
        };
        self.values.get(slot).copied().unwrap_or_default()
    }

    fn sample_at_frame(&self, index: usize, time: f32) -> T {
        let len = self.times.len();

        // No next frame: hold the last value.
        if index + 1 >= len {
            return self.value_at(len - 1);
        }

        let next_idx = index + 1;
        let t0 = self.times[index];
        let t1 = self.times[next_idx];
        let dt = t1 - t0;

        let t = if dt > 1e-6 { (time - t0) / dt } else { 0.0 };
        let t = t.clamp(0.0, 1.0);

        match self.interpolation {
            InterpolationMode::Step => self.value_at(index),
            InterpolationMode::Linear => {
                T::interpolate_linear(self.value_at(index), self.value_at(next_idx), t)
            }
            InterpolationMode::CubicSpline => {
                let i_prev = index * 3;
                let i_next = next_idx * 3;
                let get = |slot: usize| self.values.get(slot).copied().unwrap_or_default();

                T::interpolate_cubic(
                    get(i_prev + 1),
                    get(i_prev + 2),
                    get(i_next),
                    get(i_next + 1),
                    t,
                    dt,
                )
            }
        }
    }
}
