//! The location/relation vocabulary shared by the pairwise (§4.R) and
//! multi-segment (§4.M) intersectors.

/// Where a point sits relative to an oriented segment. `Before`/`Between`/
/// `After` apply only to collinear points; `Left`/`Right` to non-collinear
/// points by the sign of the 2D cross product; `None` means "not on the
/// infinite line and not otherwise classified" — used only by the
/// multi-segment intersector for collinear-disjoint segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineLocation {
    Start,
    End,
    Before,
    Between,
    After,
    Left,
    Right,
    None,
}

impl LineLocation {
    pub fn is_collinear_range(&self) -> bool {
        matches!(
            self,
            LineLocation::Start | LineLocation::End | LineLocation::Before
                | LineLocation::Between | LineLocation::After
        )
    }

    pub fn is_endpoint(&self) -> bool {
        matches!(self, LineLocation::Start | LineLocation::End)
    }
}

/// The relation between two segments' infinite carriers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineRelation {
    Parallel,
    Collinear,
    Divergent,
}
