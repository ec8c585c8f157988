use std::str::FromStr;

use super::node::ConfigNode;
use crate::logging::LogContext;
use crate::marker::{MarkerKind, MarkerRecord};
use crate::palette::PaletteColor;

pub const GENERAL_NODE: &str = "GENERAL";
pub const MARKERS_NODE: &str = "MARKERS";
pub const MARKER_PREFIX: &str = "MARKER_";

const KEY_DEBUG: &str = "debug";
const KEY_NAME: &str = "name";
const KEY_TYPE: &str = "type";
const KEY_POSITION_X: &str = "positionX";
const KEY_POSITION_Y: &str = "positionY";
const KEY_RADIUS: &str = "radius";
const KEY_DIVISIONS: &str = "divisions";
const KEY_COLOR: &str = "color";
const KEY_VISIBLE: &str = "visible";

const MARKER_KEYS: [&str; 8] = [
    KEY_NAME,
    KEY_TYPE,
    KEY_POSITION_X,
    KEY_POSITION_Y,
    KEY_RADIUS,
    KEY_DIVISIONS,
    KEY_COLOR,
    KEY_VISIBLE,
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeneralSettings {
    pub debug: bool,
}

/// Everything persisted in the config file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayConfig {
    pub settings: GeneralSettings,
    pub markers: Vec<MarkerRecord>,
}

/// True for `true`, `1` or `yes` in any case. Every other value is false.
pub fn parse_bool(raw: &str) -> bool {
    let v = raw.trim();
    ["true", "1", "yes"].iter().any(|t| v.eq_ignore_ascii_case(t))
}

#[inline]
fn bool_literal(v: bool) -> &'static str {
    if v {
        "true"
    } else {
        "false"
    }
}

/// Maps [`OverlayConfig`] to and from a [`ConfigNode`] tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigCodec {
    log: LogContext,
}

impl ConfigCodec {
    pub fn new(log: LogContext) -> Self {
        Self { log }
    }

    pub fn log(&self) -> &LogContext {
        &self.log
    }

    /// Writes every field of every record, whatever its kind. Marker nodes are
    /// numbered by list position at save time.
    pub fn serialize(&self, config: &OverlayConfig) -> ConfigNode {
        let mut root = ConfigNode::default();

        let mut general = ConfigNode::new(GENERAL_NODE);
        general.set_value(KEY_DEBUG, bool_literal(config.settings.debug));
        root.add_node(general);

        let mut markers = ConfigNode::new(MARKERS_NODE);
        for (i, m) in config.markers.iter().enumerate() {
            self.log.debug(format_args!(
                "saving marker {i}: {}, type: {}, pos: ({}, {}), color: {}",
                m.name, m.kind, m.position.x, m.position.y, m.color
            ));
            let mut node = ConfigNode::new(format!("{MARKER_PREFIX}{i}"));
            node.set_value(KEY_NAME, m.name.as_str());
            node.set_value(KEY_TYPE, m.kind.as_str());
            node.set_value(KEY_POSITION_X, m.position.x.to_string());
            node.set_value(KEY_POSITION_Y, m.position.y.to_string());
            node.set_value(KEY_RADIUS, m.circle.radius.to_string());
            node.set_value(KEY_DIVISIONS, m.circle.divisions.to_string());
            node.set_value(KEY_COLOR, m.color.name());
            node.set_value(KEY_VISIBLE, bool_literal(m.visible));
            markers.add_node(node);
        }
        root.add_node(markers);
        root
    }

    /// Never fails: missing sections, keys or malformed values fall back to
    /// defaults at the smallest granularity and are logged.
    pub fn deserialize(&self, root: &ConfigNode) -> OverlayConfig {
        let settings = self.read_general(root);

        let Some(markers_node) = root.node(MARKERS_NODE) else {
            self.log
                .debug(format_args!("no {MARKERS_NODE} section, starting with empty list"));
            return OverlayConfig {
                settings,
                markers: Vec::new(),
            };
        };

        let mut markers = Vec::new();
        for node in markers_node.nodes() {
            if !node.name.starts_with(MARKER_PREFIX) {
                self.log
                    .debug(format_args!("ignoring `{}` under {MARKERS_NODE}", node.name));
                continue;
            }
            markers.push(self.read_marker(node));
        }
        OverlayConfig { settings, markers }
    }

    fn read_general(&self, root: &ConfigNode) -> GeneralSettings {
        let mut settings = GeneralSettings::default();
        let Some(general) = root.node(GENERAL_NODE) else {
            return settings;
        };
        if let Some(raw) = general.value(KEY_DEBUG) {
            settings.debug = parse_bool(raw);
        }
        settings
    }

    /// Decodes one marker node. Absent keys keep their defaults, so an empty
    /// node yields [`MarkerRecord::default`].
    pub fn read_marker(&self, node: &ConfigNode) -> MarkerRecord {
        let owner = node.name.as_str();
        for key in node.keys().filter(|k| !MARKER_KEYS.contains(k)) {
            self.log
                .debug(format_args!("{owner}: ignoring unknown key `{key}`"));
        }

        let mut m = MarkerRecord::default();

        if let Some(name) = node.value(KEY_NAME).filter(|n| !n.is_empty()) {
            m.name = name.to_string();
        }
        self.field(owner, node, KEY_TYPE, &mut m.kind, |s| MarkerKind::from_str(s).ok());
        self.field(owner, node, KEY_POSITION_X, &mut m.position.x, parse_f32);
        self.field(owner, node, KEY_POSITION_Y, &mut m.position.y, parse_f32);
        self.field(owner, node, KEY_RADIUS, &mut m.circle.radius, parse_f32);
        self.field(owner, node, KEY_DIVISIONS, &mut m.circle.divisions, |s| {
            s.trim().parse::<i32>().ok()
        });
        self.field(owner, node, KEY_COLOR, &mut m.color, |s| {
            PaletteColor::from_name(s.trim())
        });
        if let Some(raw) = node.value(KEY_VISIBLE) {
            m.visible = parse_bool(raw);
        }
        m
    }

    /// Overwrites `slot` only when the key is present and parses; a bad value
    /// leaves the default in place.
    fn field<T: std::fmt::Debug>(
        &self,
        owner: &str,
        node: &ConfigNode,
        key: &str,
        slot: &mut T,
        parse: impl FnOnce(&str) -> Option<T>,
    ) {
        let Some(raw) = node.value(key) else {
            return;
        };
        match parse(raw) {
            Some(v) => *slot = v,
            None => self.log.warn(format_args!(
                "{owner}: invalid value `{raw}` for `{key}`, keeping {slot:?}"
            )),
        }
    }
}

#[inline]
fn parse_f32(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok()
}

