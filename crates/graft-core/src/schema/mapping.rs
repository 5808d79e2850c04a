mod join_tree;
pub use join_tree::{
    JoinNode, JoinNodeId, JoinPredicate, JoinTree, JoinTreeBuilder, Relation,
};
