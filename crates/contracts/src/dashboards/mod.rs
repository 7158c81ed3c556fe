pub mod d410_goal_tracking;
