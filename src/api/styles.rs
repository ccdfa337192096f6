use crate::render::{StyleRules, merge_rules, rules_from};

/// Rules shared by every chart kind.
#[must_use]
pub fn default_styles() -> StyleRules {
    rules_from(&[
        (
            ".pie-chart-label",
            &[
                ("fontFamily", "sans-serif"),
                ("fontSize", "12px"),
                ("textAnchor", "middle"),
                ("fill", "#000"),
            ],
        ),
        (
            ".pie-chart-slice",
            &[("stroke", "#fff"), ("strokeWidth", "1"), ("opacity", "1")],
        ),
        (".pie-chart-slice:hover", &[("opacity", "0.8")]),
        (
            ".line",
            &[("fill", "none"), ("strokeWidth", "1.5px"), ("opacity", "0.7")],
        ),
        (".line:hover", &[("opacity", "1")]),
        ("circle.data-point", &[("r", "4")]),
        ("circle.data-point:hover", &[("r", "6"), ("opacity", "0.6")]),
        (".bar", &[("fill", "#3F4C55")]),
        (".bar:hover", &[("opacity", "0.8")]),
        (
            ".axis",
            &[("fontFamily", "dobra-light,Arial,sans-serif"), ("fontSize", "9px")],
        ),
        (".axis .label", &[("font", "14px arial")]),
        (
            ".axis path, .axis line",
            &[
                ("fill", "none"),
                ("strokeWidth", "1"),
                ("shapeRendering", "crispEdges"),
            ],
        ),
        (".x.axis path", &[("display", "none"), ("stroke", "lightgrey")]),
        (
            ".tick line",
            &[("stroke", "lightgrey"), ("strokeWidth", "1"), ("opacity", "0.7")],
        ),
    ])
}

/// Grid and orientation dependent axis rules.
#[must_use]
pub fn axis_styles(grid: bool, vertical_grid: bool, y_axis_orient_right: bool) -> StyleRules {
    let x_tick_opacity = if grid && vertical_grid { "0.7" } else { "0" };
    let y_tick_opacity = if grid { "0.7" } else { "0" };
    let y_domain_display = if y_axis_orient_right { "none" } else { "inline" };
    rules_from(&[
        (".x.axis .tick line", &[("opacity", x_tick_opacity)]),
        (".y.axis .tick line", &[("opacity", y_tick_opacity)]),
        (".y.axis path", &[("display", y_domain_display)]),
    ])
}

/// Defaults, then user rules, then `extra`; later rules win per property.
#[must_use]
pub fn compose_styles(user: &StyleRules, extra: Option<StyleRules>) -> StyleRules {
    let mut rules = default_styles();
    merge_rules(&mut rules, user);
    if let Some(extra) = extra {
        merge_rules(&mut rules, &extra);
    }
    rules
}
