// 対局の進行制御
pub mod engine;
pub mod pao;
pub mod possible_actions;
pub mod round;
pub mod settlement;
pub mod shuugi;
pub mod snapshot;
pub mod stage_controller;
pub mod wall;
pub mod win;

pub use engine::execute;
pub use possible_actions::possible_actions;
pub use round::{advance_round, start_round, start_round_with_wall};
pub use settlement::calc_settlement;
pub use snapshot::{apply_external_state, check_conservation};
pub use stage_controller::StageController;
