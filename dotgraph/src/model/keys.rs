//! The vocabulary of GraphViz attribute names, and the kinds of objects that
//! each attribute applies to.
//! See: <https://graphviz.org/doc/info/attrs.html>

use super::attributes::AttributeKind;

pub const GRAPH: u8 = 1;
pub const NODE: u8 = 2;
pub const EDGE: u8 = 4;
pub const SUBGRAPH: u8 = 8;
pub const CLUSTER: u8 = 16;

const G: u8 = GRAPH;
const N: u8 = NODE;
const E: u8 = EDGE;
const S: u8 = SUBGRAPH;
const C: u8 = CLUSTER;

// Sorted by name.
static KEYS: &[(&str, u8)] = &[
    ("Damping", G),
    ("K", G | C),
    ("TBbalance", G),
    ("URL", E | N | G | C),
    ("_background", G),
    ("area", N | C),
    ("arrowhead", E),
    ("arrowsize", E),
    ("arrowtail", E),
    ("bb", G | C),
    ("beautify", G),
    ("bgcolor", G | C),
    ("center", G),
    ("charset", G),
    ("class", E | N | C | G),
    ("cluster", C),
    ("clusterrank", G),
    ("color", E | N | C),
    ("colorscheme", E | N | C | G),
    ("comment", E | N | G),
    ("compound", G),
    ("concentrate", G),
    ("constraint", E),
    ("decorate", E),
    ("defaultdist", G),
    ("dim", G),
    ("dimen", G),
    ("dir", E),
    ("diredgeconstraints", G),
    ("distortion", N),
    ("dpi", G),
    ("edgeURL", E),
    ("edgehref", E),
    ("edgetarget", E),
    ("edgetooltip", E),
    ("epsilon", G),
    ("esep", G),
    ("fillcolor", N | E | C),
    ("fixedsize", N),
    ("fontcolor", E | N | G | C),
    ("fontname", E | N | G | C),
    ("fontnames", G),
    ("fontpath", G),
    ("fontsize", E | N | G | C),
    ("forcelabels", G),
    ("gradientangle", N | C | G),
    ("group", N),
    ("headURL", E),
    ("head_lp", E),
    ("headclip", E),
    ("headhref", E),
    ("headlabel", E),
    ("headport", E),
    ("headtarget", E),
    ("headtooltip", E),
    ("height", N),
    ("href", G | C | N | E),
    ("id", G | C | N | E),
    ("image", N),
    ("imagepath", G),
    ("imagepos", N),
    ("imagescale", N),
    ("inputscale", G),
    ("label", E | N | G | C),
    ("labelURL", E),
    ("label_scheme", G),
    ("labelangle", E),
    ("labeldistance", E),
    ("labelfloat", E),
    ("labelfontcolor", E),
    ("labelfontname", E),
    ("labelfontsize", E),
    ("labelhref", E),
    ("labeljust", G | C),
    ("labelloc", N | G | C),
    ("labeltarget", E),
    ("labeltooltip", E),
    ("landscape", G),
    ("layer", E | N | C),
    ("layerlistsep", G),
    ("layers", G),
    ("layerselect", G),
    ("layersep", G),
    ("layout", G),
    ("len", E),
    ("levels", G),
    ("levelsgap", G),
    ("lhead", E),
    ("lheight", G | C),
    ("linelength", G),
    ("lp", E | G | C),
    ("ltail", E),
    ("lwidth", G | C),
    ("margin", N | C | G),
    ("maxiter", G),
    ("mclimit", G),
    ("mindist", G),
    ("minlen", E),
    ("mode", G),
    ("model", G),
    ("newrank", G),
    ("nodesep", G),
    ("nojustify", G | C | N | E),
    ("normalize", G),
    ("notranslate", G),
    ("nslimit", G),
    ("nslimit1", G),
    ("oneblock", G),
    ("ordering", G | N),
    ("orientation", N | G),
    ("outputorder", G),
    ("overlap", G),
    ("overlap_scaling", G),
    ("overlap_shrink", G),
    ("pack", G),
    ("packmode", G),
    ("pad", G),
    ("page", G),
    ("pagedir", G),
    ("pencolor", C),
    ("penwidth", C | N | E),
    ("peripheries", N | C),
    ("pin", N),
    ("pos", E | N),
    ("quadtree", G),
    ("quantum", G),
    ("rank", S),
    ("rankdir", G),
    ("ranksep", G),
    ("ratio", G),
    ("rects", N),
    ("regular", N),
    ("remincross", G),
    ("repulsiveforce", G),
    ("resolution", G),
    ("root", G | N),
    ("rotate", G),
    ("rotation", G),
    ("samehead", E),
    ("sametail", E),
    ("samplepoints", N),
    ("scale", G),
    ("searchsize", G),
    ("sep", G),
    ("shape", N),
    ("shapefile", N),
    ("showboxes", E | N | G),
    ("sides", N),
    ("size", G),
    ("skew", N),
    ("smoothing", G),
    ("sortv", G | C | N),
    ("splines", G),
    ("start", G),
    ("style", E | N | C | G),
    ("stylesheet", G),
    ("tailURL", E),
    ("tail_lp", E),
    ("tailclip", E),
    ("tailhref", E),
    ("taillabel", E),
    ("tailport", E),
    ("tailtarget", E),
    ("tailtooltip", E),
    ("target", E | N | G | C),
    ("tooltip", N | E | C),
    ("truecolor", G),
    ("vertices", N),
    ("viewport", G),
    ("voro_margin", G),
    ("weight", E),
    ("width", N),
    ("xdotversion", G),
    ("xlabel", E | N),
    ("xlp", N | E),
    ("z", N),
];

/// Returns the flags of the objects that use \p key, or None if the key is
/// not a known attribute.
pub fn used_by(key: &str) -> Option<u8> {
    KEYS.binary_search_by(|(name, _)| (*name).cmp(key))
        .ok()
        .map(|idx| KEYS[idx].1)
}

fn mask(kind: AttributeKind) -> u8 {
    match kind {
        AttributeKind::Graph => GRAPH,
        AttributeKind::Node => NODE,
        AttributeKind::Edge => EDGE,
        AttributeKind::Subgraph => SUBGRAPH,
        // Clusters are subgraphs too, so they accept 'rank'.
        AttributeKind::ClusterSubgraph => CLUSTER | SUBGRAPH,
    }
}

/// Returns true if \p key is an attribute of objects of kind \p kind.
pub fn is_valid_key(kind: AttributeKind, key: &str) -> bool {
    match used_by(key) {
        Some(flags) => flags & mask(kind) != 0,
        None => false,
    }
}

/// Returns the names of the attributes of \p kind, sorted.
pub fn keys_for(kind: AttributeKind) -> impl Iterator<Item = &'static str> {
    let mask = mask(kind);
    KEYS.iter()
        .filter(move |(_, flags)| flags & mask != 0)
        .map(|(name, _)| *name)
}

#[test]
fn test_keys_are_sorted() {
    for pair in KEYS.windows(2) {
        assert!(pair[0].0 < pair[1].0, "{} >= {}", pair[0].0, pair[1].0);
    }
}

#[test]
fn test_key_kinds() {
    assert!(is_valid_key(AttributeKind::Graph, "rankdir"));
    assert!(!is_valid_key(AttributeKind::Node, "rankdir"));
    assert!(is_valid_key(AttributeKind::Node, "shape"));
    assert!(is_valid_key(AttributeKind::Edge, "arrowhead"));
    assert!(is_valid_key(AttributeKind::Subgraph, "rank"));
    assert!(!is_valid_key(AttributeKind::Subgraph, "label"));
    assert!(is_valid_key(AttributeKind::ClusterSubgraph, "label"));
    assert!(is_valid_key(AttributeKind::ClusterSubgraph, "rank"));
    assert!(!is_valid_key(AttributeKind::Graph, "no_such_key"));
    assert!(!is_valid_key(AttributeKind::Graph, "url"));
    assert!(is_valid_key(AttributeKind::Graph, "URL"));
}

#[test]
fn test_keys_for() {
    let subgraph: Vec<&str> = keys_for(AttributeKind::Subgraph).collect();
    assert_eq!(subgraph, vec!["rank"]);
    let node: Vec<&str> = keys_for(AttributeKind::Node).collect();
    assert!(node.contains(&"shape"));
    assert!(!node.contains(&"rankdir"));
}
