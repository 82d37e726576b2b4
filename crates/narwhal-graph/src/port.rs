use crate::direction::CardinalDirection;
use crate::error::{Error, Result};
use crate::id::validate_id;

/// Placement of a port along one side of a vertex outline.
///
/// `percentage` runs from 0 to 100: left to right on the North/South sides, top to bottom on
/// the East/West sides. Values are immutable; moving a port replaces its position wholesale.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "CardinalPortPositionRecord")]
pub struct CardinalPortPosition {
    direction: CardinalDirection,
    percentage: f64,
}

#[derive(serde::Deserialize)]
struct CardinalPortPositionRecord {
    direction: CardinalDirection,
    percentage: f64,
}

impl TryFrom<CardinalPortPositionRecord> for CardinalPortPosition {
    type Error = Error;

    fn try_from(value: CardinalPortPositionRecord) -> Result<Self> {
        Self::new(value.direction, value.percentage)
    }
}

impl CardinalPortPosition {
    pub fn new(direction: CardinalDirection, percentage: f64) -> Result<Self> {
        if !(percentage.is_finite() && (0.0..=100.0).contains(&percentage)) {
            return Err(Error::PercentageOutOfRange { value: percentage });
        }
        Ok(Self {
            direction,
            percentage,
        })
    }

    /// Midpoint of the given side.
    pub const fn centered(direction: CardinalDirection) -> Self {
        Self {
            direction,
            percentage: 50.0,
        }
    }

    pub fn direction(&self) -> CardinalDirection {
        self.direction
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Slides the port along the outline by a fraction of the side length.
    ///
    /// North/South ports follow `dx_fraction`, East/West ports follow `dy_fraction`. Sliding past
    /// either end of a side wraps onto the adjacent side at the shared corner.
    pub fn slide(self, dx_fraction: f64, dy_fraction: f64) -> Self {
        if !(dx_fraction.is_finite() && dy_fraction.is_finite()) {
            return self;
        }

        let along = if self.direction.is_horizontal_side() {
            dx_fraction
        } else {
            dy_fraction
        };
        let amount = self.percentage / 100.0 + along;

        let (direction, amount) = if (0.0..=1.0).contains(&amount) {
            (self.direction, amount)
        } else {
            let past_end = amount > 1.0;
            match (self.direction, past_end) {
                (CardinalDirection::North, true) => (CardinalDirection::East, 0.0),
                (CardinalDirection::North, false) => (CardinalDirection::West, 0.0),
                (CardinalDirection::South, true) => (CardinalDirection::East, 1.0),
                (CardinalDirection::South, false) => (CardinalDirection::West, 1.0),
                (CardinalDirection::East, true) => (CardinalDirection::South, 1.0),
                (CardinalDirection::East, false) => (CardinalDirection::North, 1.0),
                (CardinalDirection::West, true) => (CardinalDirection::South, 0.0),
                (CardinalDirection::West, false) => (CardinalDirection::North, 0.0),
            }
        };

        Self {
            direction,
            percentage: amount * 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortRole {
    Input,
    Output,
}

/// A named attachment point on a vertex.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Port {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// `None` until the port is placed by the user or by the layout's port-default pass.
    #[serde(default)]
    pub position: Option<CardinalPortPosition>,
}

impl Port {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            position: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_position(mut self, position: CardinalPortPosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn validate(&self) -> Result<()> {
        validate_id(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::{CardinalPortPosition, Port};
    use crate::{CardinalDirection, Error};

    fn pos(direction: CardinalDirection, percentage: f64) -> CardinalPortPosition {
        CardinalPortPosition::new(direction, percentage).unwrap()
    }

    #[test]
    fn percentage_must_be_in_range() {
        assert!(CardinalPortPosition::new(CardinalDirection::East, 0.0).is_ok());
        assert!(CardinalPortPosition::new(CardinalDirection::East, 100.0).is_ok());
        assert_eq!(
            CardinalPortPosition::new(CardinalDirection::East, 100.5),
            Err(Error::PercentageOutOfRange { value: 100.5 })
        );
        assert!(CardinalPortPosition::new(CardinalDirection::East, -1.0).is_err());
        assert!(CardinalPortPosition::new(CardinalDirection::East, f64::NAN).is_err());
    }

    #[test]
    fn slide_within_a_side_keeps_direction() {
        let p = pos(CardinalDirection::North, 50.0).slide(0.25, 0.9);
        assert_eq!(p.direction(), CardinalDirection::North);
        assert!((p.percentage() - 75.0).abs() < 1e-9);

        let p = pos(CardinalDirection::West, 50.0).slide(0.9, -0.25);
        assert_eq!(p.direction(), CardinalDirection::West);
        assert!((p.percentage() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn slide_wraps_around_each_corner() {
        let cases = [
            (CardinalDirection::North, 0.6, 0.0, CardinalDirection::East, 0.0),
            (CardinalDirection::North, -0.6, 0.0, CardinalDirection::West, 0.0),
            (CardinalDirection::South, 0.6, 0.0, CardinalDirection::East, 100.0),
            (CardinalDirection::South, -0.6, 0.0, CardinalDirection::West, 100.0),
            (CardinalDirection::East, 0.0, 0.6, CardinalDirection::South, 100.0),
            (CardinalDirection::East, 0.0, -0.6, CardinalDirection::North, 100.0),
            (CardinalDirection::West, 0.0, 0.6, CardinalDirection::South, 0.0),
            (CardinalDirection::West, 0.0, -0.6, CardinalDirection::North, 0.0),
        ];
        for (from, dx, dy, direction, percentage) in cases {
            let p = pos(from, 50.0).slide(dx, dy);
            assert_eq!(p.direction(), direction, "from {from} by ({dx}, {dy})");
            assert_eq!(p.percentage(), percentage, "from {from} by ({dx}, {dy})");
        }
    }

    #[test]
    fn slide_ignores_non_finite_deltas() {
        let p = pos(CardinalDirection::South, 30.0);
        assert_eq!(p.slide(f64::NAN, 0.0), p);
    }

    #[test]
    fn deserialization_validates_percentage() {
        let ok: CardinalPortPosition =
            serde_json::from_str(r#"{"direction":"W","percentage":12.5}"#).unwrap();
        assert_eq!(ok, pos(CardinalDirection::West, 12.5));

        let err = serde_json::from_str::<CardinalPortPosition>(
            r#"{"direction":"W","percentage":250}"#,
        );
        assert!(err.is_err());

        let err = serde_json::from_str::<CardinalPortPosition>(
            r#"{"direction":"NW","percentage":50}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn unplaced_ports_serialize_a_null_position() {
        let json = serde_json::to_value(Port::new("in0")).unwrap();
        assert_eq!(json, serde_json::json!({"id": "in0", "position": null}));
    }
}
