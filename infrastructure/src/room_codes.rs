//! Random room code generator

use pulse_application::ports::room_codes::RoomCodeGenerator;
use pulse_domain::RoomCode;
use pulse_domain::session::room_code::{MAX_GENERATED_CODE, MIN_GENERATED_CODE};
use rand::Rng;

/// Draws codes uniformly from 1000..=9999
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomRoomCodeGenerator;

impl RoomCodeGenerator for RandomRoomCodeGenerator {
    fn next_code(&self) -> RoomCode {
        let n = rand::thread_rng().gen_range(MIN_GENERATED_CODE..=MAX_GENERATED_CODE);
        RoomCode::clamped(n)
    }
}
