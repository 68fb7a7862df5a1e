pub mod bridge;
pub mod population;
pub mod settings;
pub mod sprites;
pub mod stage;
pub mod worldtime;
