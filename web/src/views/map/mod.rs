pub mod map_marker;
pub mod map_renderer;
pub mod restaurant_map;
