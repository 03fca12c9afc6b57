/// Takes coins in input order until the target is covered
pub mod greedy;
/// Deterministic 0/1 subset-sum over small coin values
pub mod knapsack;
/// Smallest single coin larger than the target
pub mod lowestlarger;
