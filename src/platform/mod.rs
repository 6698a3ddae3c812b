// Host integration: landmark input and feedback output

pub mod feedback;
pub mod pose;
