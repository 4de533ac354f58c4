// src/controllers/osc.rs
// OSC Controller: remote control of the curtain's inputs

use nannou_osc as osc;

use crate::error::{CurtainError, Result};
use crate::models::Direction;

#[derive(Debug, Clone, PartialEq)]
pub enum OscCommand {
    PullPoint { x: f32, y: f32 },
    PullPointFraction { x: f32, y: f32 },
    SetDirection(Direction),
    SetTexture { path: String },
    SetAttached(bool),
    ClearTexture,
}

pub struct OscController {
    command_queue: Vec<OscCommand>,
    receiver: osc::Receiver,
}

impl OscController {
    pub fn new(port: u16) -> Result<Self> {
        let receiver = osc::receiver(port).map_err(|e| CurtainError::Osc(e.to_string()))?;
        tracing::info!("Listening for OSC on port {}", port);

        Ok(Self {
            command_queue: Vec::new(),
            receiver,
        })
    }

    pub fn process_messages(&mut self) {
        for (packet, _addr) in self.receiver.try_iter() {
            for message in packet.into_msgs() {
                match parse_message(&message.addr, &message.args) {
                    Some(command) => self.command_queue.push(command),
                    None => tracing::warn!(
                        "Unknown OSC message: {} {:?}",
                        message.addr,
                        message.args
                    ),
                }
            }
        }
    }

    pub fn take_commands(&mut self) -> Vec<OscCommand> {
        std::mem::take(&mut self.command_queue)
    }
}

/// Maps one OSC message onto a command. None for unknown addresses or
/// argument lists that don't match.
pub fn parse_message(addr: &str, args: &[osc::Type]) -> Option<OscCommand> {
    match (addr, args) {
        ("/curtain/pull", [x, y]) => Some(OscCommand::PullPoint {
            x: as_f32(x)?,
            y: as_f32(y)?,
        }),
        ("/curtain/pull_fraction", [x, y]) => Some(OscCommand::PullPointFraction {
            x: as_f32(x)?,
            y: as_f32(y)?,
        }),
        ("/curtain/direction", [osc::Type::String(side)]) => match side.as_str() {
            "left" => Some(OscCommand::SetDirection(Direction::Left)),
            "right" => Some(OscCommand::SetDirection(Direction::Right)),
            _ => None,
        },
        ("/curtain/direction", [osc::Type::Int(side)]) => match *side {
            0 => Some(OscCommand::SetDirection(Direction::Left)),
            1 => Some(OscCommand::SetDirection(Direction::Right)),
            _ => None,
        },
        ("/curtain/texture", [osc::Type::String(path)]) => {
            Some(OscCommand::SetTexture { path: path.clone() })
        }
        ("/curtain/clear", []) => Some(OscCommand::ClearTexture),
        ("/curtain/attach", [osc::Type::Int(setting)]) => {
            Some(OscCommand::SetAttached(*setting != 0))
        }
        _ => None,
    }
}

// controllers send either ints or floats for coordinates; NaN and inf are dropped
fn as_f32(arg: &osc::Type) -> Option<f32> {
    let value = match arg {
        osc::Type::Float(v) => *v,
        osc::Type::Double(v) => *v as f32,
        osc::Type::Int(v) => *v as f32,
        _ => return None,
    };
    value.is_finite().then_some(value)
}
