use super::operation::Operation;

/// Rebuild the operation forest from the flat decoder stream.
///
/// Each parallel block takes the `child_count` operations right after it as
/// children; they no longer appear at the top level. A block near the end of a
/// truncated stream keeps whatever children were decoded.
pub fn build_forest(flat: Vec<Operation>) -> Vec<Operation> {
    let mut forest = Vec::with_capacity(flat.len());
    let mut stream = flat.into_iter();

    while let Some(mut op) = stream.next() {
        if let Operation::ParallelBlock {
            child_count,
            children,
        } = &mut op
        {
            children.extend(stream.by_ref().take(usize::from(*child_count)));
        }
        forest.push(op);
    }

    forest
}

/// Inverse of [`build_forest`]: children are placed back after their block.
pub fn flatten_forest(forest: &[Operation]) -> Vec<Operation> {
    let mut flat = Vec::with_capacity(forest.iter().map(Operation::subtree_len).sum());
    for op in forest {
        push_flat(&mut flat, op);
    }
    flat
}

fn push_flat(flat: &mut Vec<Operation>, op: &Operation) {
    match op {
        Operation::ParallelBlock {
            child_count,
            children,
        } => {
            flat.push(Operation::ParallelBlock {
                child_count: *child_count,
                children: Vec::new(),
            });
            for child in children {
                push_flat(flat, child);
            }
        }
        other => flat.push(other.clone()),
    }
}
