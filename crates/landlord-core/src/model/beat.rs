use crate::model::pattern::{PatternKind, Play};

/// Whether `candidate` may legally replace `incumbent` as the last play.
///
/// Both plays are assumed to be valid shapes; classification happens first.
pub fn can_beat(candidate: &Play, incumbent: &Play) -> bool {
    if candidate.kind == PatternKind::Rocket {
        return true;
    }
    if incumbent.kind == PatternKind::Rocket {
        return false;
    }
    if candidate.kind == PatternKind::Bomb && incumbent.kind != PatternKind::Bomb {
        return true;
    }
    if incumbent.kind == PatternKind::Bomb && candidate.kind != PatternKind::Bomb {
        return false;
    }
    candidate.kind == incumbent.kind
        && candidate.len() == incumbent.len()
        && candidate.weight > incumbent.weight
}
