pub use point::Point;

mod point;
