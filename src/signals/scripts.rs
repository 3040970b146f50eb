//! JavaScript probes evaluated in the page
//!
//! Every probe returns plain JSON (`returnByValue`). A probe that finds the
//! API missing returns `null`; a blocked API surfaces as a thrown exception.

use super::traits::CanvasSpec;

/// `navigator.userAgent`
pub const USER_AGENT_SCRIPT: &str = "navigator.userAgent";

/// Reported languages with the single-language fallback, duplicates kept
pub const LANGUAGES_SCRIPT: &str = r#"
(() => {
    if (navigator.languages && navigator.languages.length > 0) {
        return Array.from(navigator.languages);
    }
    return navigator.language ? [navigator.language] : [];
})()
"#;

/// IANA zone name from `Intl`; `null` when unresolved
pub const TIME_ZONE_SCRIPT: &str =
    "Intl.DateTimeFormat().resolvedOptions().timeZone || null";

/// Offset from local time to UTC in minutes
pub const TIME_ZONE_OFFSET_SCRIPT: &str = "new Date().getTimezoneOffset()";

/// Physical screen geometry; `null` without a screen object
pub const SCREEN_SCRIPT: &str = r#"
(() => {
    const s = window.screen;
    if (!s) return null;
    const num = (v) => typeof v === "number" ? v : null;
    return { width: num(s.width), height: num(s.height), colorDepth: num(s.colorDepth) };
})()
"#;

/// Hardware hints, each `null` unless the platform reports a number
pub const HARDWARE_SCRIPT: &str = r#"
(() => {
    const num = (v) => typeof v === "number" ? v : null;
    return {
        deviceMemoryGB: num(navigator.deviceMemory),
        hardwareConcurrency: num(navigator.hardwareConcurrency),
        maxTouchPoints: num(navigator.maxTouchPoints)
    };
})()
"#;

/// Low-entropy user-agent data; `null` when the high-entropy API is missing
pub const UA_DATA_SCRIPT: &str = r#"
(() => {
    const d = navigator.userAgentData;
    if (!d || typeof d.getHighEntropyValues !== "function") return null;
    return {
        brands: Array.from(d.brands || []).map(b => ({ brand: String(b.brand), version: String(b.version) })),
        mobile: !!d.mobile,
        platform: String(d.platform || "")
    };
})()
"#;

/// Unmasked WebGL vendor and renderer
pub const WEBGL_SCRIPT: &str = r#"
(() => {
    const canvas = document.createElement("canvas");
    const gl = canvas.getContext("webgl") || canvas.getContext("experimental-webgl");
    if (!gl) return null;
    const dbg = gl.getExtension("WEBGL_debug_renderer_info");
    if (!dbg) return null;
    const vendor = gl.getParameter(dbg.UNMASKED_VENDOR_WEBGL);
    const renderer = gl.getParameter(dbg.UNMASKED_RENDERER_WEBGL);
    if (typeof vendor !== "string" || typeof renderer !== "string") return null;
    return { vendor, renderer };
})()
"#;

/// Request the given high-entropy hints; resolves to the hint values only
pub fn high_entropy_script(hints: &[&str]) -> String {
    let hints = serde_json::to_string(hints).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"
(async () => {{
    const hints = {hints};
    const values = await navigator.userAgentData.getHighEntropyValues(hints);
    return Object.fromEntries(
        hints.filter(h => typeof values[h] === "string").map(h => [h, values[h]])
    );
}})()
"#
    )
}

/// Draw `spec` and return the PNG data URL; `null` without a 2D context
pub fn canvas_script(spec: &CanvasSpec) -> String {
    format!(
        r#"
(() => {{
    const canvas = document.createElement("canvas");
    canvas.width = {width};
    canvas.height = {height};
    const ctx = canvas.getContext("2d");
    if (!ctx) return null;
    ctx.textBaseline = "alphabetic";
    ctx.fillStyle = {background};
    ctx.fillRect(0, 0, canvas.width, canvas.height);
    ctx.fillStyle = {text_color};
    ctx.font = {font};
    ctx.fillText({text}, {text_x}, {text_y});
    ctx.strokeStyle = {stroke};
    ctx.beginPath();
    ctx.arc({arc_x}, {arc_y}, {arc_r}, {arc_start}, {arc_end});
    ctx.stroke();
    return canvas.toDataURL("image/png");
}})()
"#,
        width = spec.width,
        height = spec.height,
        background = js_string(spec.background),
        text_color = js_string(spec.text_color),
        font = js_string(spec.font),
        text = js_string(spec.text),
        text_x = spec.text_x,
        text_y = spec.text_y,
        stroke = js_string(spec.stroke_color),
        arc_x = spec.arc_x,
        arc_y = spec.arc_y,
        arc_r = spec.arc_radius,
        arc_start = spec.arc_start,
        arc_end = spec.arc_end,
    )
}

/// Quote a string as a JavaScript literal
pub(crate) fn js_string(s: &str) -> String {
    // JSON string literals are valid JavaScript string literals
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}
