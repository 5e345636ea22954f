use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::geometry::WaypointPath;

/// Stamp and coordinate frame shared by a path message and its poses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub frame_id: String,
    pub stamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Quaternion orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Position,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseStamped {
    pub header: Header,
    pub pose: Pose,
}

/// A planned path as a sequence of stamped poses, ready for a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathMessage {
    pub header: Header,
    pub poses: Vec<PoseStamped>,
}

impl PathMessage {
    /// Wraps every waypoint into a pose at `z = 0` with identity
    /// orientation, all sharing one header.
    #[must_use]
    pub fn from_path(path: &WaypointPath, frame_id: &str, stamp: DateTime<Utc>) -> Self {
        let header = Header {
            frame_id: frame_id.to_owned(),
            stamp,
        };
        let poses = path
            .points
            .iter()
            .map(|p| PoseStamped {
                header: header.clone(),
                pose: Pose {
                    position: Position {
                        x: p.x,
                        y: p.y,
                        z: 0.0,
                    },
                    orientation: Orientation::default(),
                },
            })
            .collect();
        Self { header, poses }
    }

    /// Planar waypoints carried by the message.
    #[must_use]
    pub fn to_path(&self) -> WaypointPath {
        WaypointPath::from_xy(
            &self
                .poses
                .iter()
                .map(|p| (p.pose.position.x, p.pose.position.y))
                .collect::<Vec<_>>(),
        )
    }
}

/// Sink for path messages on a named channel.
pub trait PathPublisher {
    /// Publishes one message.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be delivered.
    fn publish(&mut self, channel: &str, message: &PathMessage) -> Result<()>;
}

#[derive(Serialize)]
struct Envelope<'a> {
    channel: &'a str,
    message: &'a PathMessage,
}

/// Publishes each message as one line of JSON:
/// `{"channel": ..., "message": ...}`.
#[derive(Debug)]
pub struct JsonLinePublisher<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinePublisher<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the publisher, returning the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PathPublisher for JsonLinePublisher<W> {
    fn publish(&mut self, channel: &str, message: &PathMessage) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &Envelope { channel, message })?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Stamps a path with the current time and publishes it a single time.
///
/// # Errors
///
/// Propagates the publisher's error.
pub fn publish_once<P: PathPublisher + ?Sized>(
    publisher: &mut P,
    channel: &str,
    path: &WaypointPath,
    frame_id: &str,
) -> Result<()> {
    let message = PathMessage::from_path(path, frame_id, Utc::now());
    publisher.publish(channel, &message)?;
    info!(channel, frame_id, poses = message.poses.len(), "path published");
    Ok(())
}
