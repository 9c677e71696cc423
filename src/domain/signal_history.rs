// Rolling signal-strength history, one sequence per station
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::station::StationId;

/// Number of samples retained per station.
pub const WINDOW: usize = 30;

/// Two lockstep sequences of signal readings, most-recent-last. Producers
/// push one sample per station per tick, so both sides always have the
/// same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalHistory {
    #[serde(rename = "A")]
    pub a: VecDeque<f64>,
    #[serde(rename = "B")]
    pub b: VecDeque<f64>,
}

impl SignalHistory {
    /// Append one sample for each station, evicting the oldest sample from
    /// each side once the window is full.
    pub fn push(&mut self, signal_a: f64, signal_b: f64) {
        self.a.push_back(signal_a);
        self.b.push_back(signal_b);
        while self.a.len() > WINDOW {
            self.a.pop_front();
        }
        while self.b.len() > WINDOW {
            self.b.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.a.len(), self.b.len());
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.b.is_empty()
    }

    pub fn station(&self, id: StationId) -> &VecDeque<f64> {
        match id {
            StationId::A => &self.a,
            StationId::B => &self.b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_sequences_in_lockstep() {
        let mut history = SignalHistory::default();
        for i in 0..10 {
            history.push(-67.0 - i as f64, -72.0 - i as f64);
            assert_eq!(history.a.len(), history.b.len());
        }
        assert_eq!(history.len(), 10);
    }

    #[test]
    fn test_push_past_capacity_evicts_oldest() {
        let mut history = SignalHistory::default();
        for i in 0..WINDOW {
            history.push(i as f64, -(i as f64));
        }
        assert_eq!(history.len(), WINDOW);

        history.push(99.0, -99.0);
        assert_eq!(history.len(), WINDOW);
        assert_eq!(history.a.front(), Some(&1.0));
        assert_eq!(history.b.front(), Some(&-1.0));
        assert_eq!(history.a.back(), Some(&99.0));
        assert_eq!(history.b.back(), Some(&-99.0));
    }

    #[test]
    fn test_wire_shape() {
        let mut history = SignalHistory::default();
        history.push(-67.5, -71.25);
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, "{\"A\":[-67.5],\"B\":[-71.25]}");
    }
}
