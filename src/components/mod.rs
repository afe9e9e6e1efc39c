pub mod audio_visualizer;
pub mod background_particles;
pub mod wifi_card;
