mod segments;


pub use segments::PathSegments;
