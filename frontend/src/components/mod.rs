pub mod slice_leaderboard;

pub use slice_leaderboard::SliceLeaderboard;
