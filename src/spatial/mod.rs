pub mod quadtree;
