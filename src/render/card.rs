use crate::{
    management::DEFAULT_COVER,
    render::{
        svg::Element,
        theme::{Palette, RenderOptions},
    },
    types::PlaybackSnapshot,
    utils::ms_to_clock,
};

/// Width of the text and progress column right of the album art.
pub const TEXT_COLUMN_WIDTH: u32 = 320;
pub const PADDING: u32 = 20;
/// Width available to text and the progress bar.
pub const CONTENT_WIDTH: u32 = TEXT_COLUMN_WIDTH - 2 * PADDING;
pub const CORNER_RADIUS: u32 = 14;

/// Below this, the fill is not animated towards the end of the track.
const MIN_ANIMATED_REMAINING_MS: u64 = 500;

const FONT_FAMILY: &str =
    "-apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif";
const EXPLICIT_COLOR: &str = "#E22134";
const EXPLICIT_BADGE_SIZE: u32 = 14;
/// Distance from the badge's left edge to the text column.
const EXPLICIT_BADGE_OFFSET: u32 = 17;
const NOT_PLAYING_ARTIST: &str = "*cricket noises*";
const PLACEHOLDER: &str = "—";

const EQ_BARS: u32 = 4;
const EQ_BAR_WIDTH: u32 = 3;
const EQ_BAR_GAP: u32 = 2;
const EQ_HEIGHTS: [u32; 5] = [3, 12, 5, 10, 3];
const EQ_BASE_DURATION_MS: u32 = 800;
const EQ_STAGGER_MS: u32 = 150;

const PROGRESS_HEIGHT: u32 = 4;

/// Card geometry derived from the requested size.
struct Layout {
    art: u32,
    width: u32,
    height: u32,
    text_x: u32,
    header_y: u32,
    title_y: u32,
    artist_y: u32,
    progress_y: u32,
    time_y: u32,
}

impl Layout {
    fn new(options: &RenderOptions) -> Self {
        let art = options.size.art_size();
        let height = art;
        let header_y = PADDING + 12;
        let title_y = header_y + 34;
        Self {
            art,
            width: art + TEXT_COLUMN_WIDTH,
            height,
            text_x: art + PADDING,
            header_y,
            title_y,
            artist_y: title_y + 24,
            progress_y: height - PADDING - 26,
            time_y: height - PADDING,
        }
    }
}

/// Renders the now-playing badge.
///
/// Pure and deterministic: the same snapshot and options always give the same
/// markup. Only the size option affects the canvas dimensions.
pub fn render(snapshot: &PlaybackSnapshot, options: &RenderOptions) -> String {
    let layout = Layout::new(options);
    let palette = options.theme.palette();
    let cover = if snapshot.image_url.is_empty() {
        DEFAULT_COVER
    } else {
        snapshot.image_url.as_str()
    };
    let label = status_label(snapshot, options);

    let content = Element::new("g")
        .attr("id", "content")
        .child(
            Element::new("image")
                .attr("href", cover)
                .attr("x", 0)
                .attr("y", 0)
                .attr("width", layout.art)
                .attr("height", layout.art)
                .attr("preserveAspectRatio", "xMidYMid slice"),
        )
        .child(text_block(snapshot, &layout, &palette));

    let content = if snapshot.track_url.is_empty() {
        content
    } else {
        Element::new("a")
            .attr("href", &snapshot.track_url)
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer")
            .child(content)
    };

    let equalizer = snapshot
        .is_playing
        .then(|| equalizer(&layout, &snapshot.accent));

    let card = Element::new("g")
        .attr("clip-path", "url(#card-clip)")
        .child(background(&layout, &palette))
        .child(backdrop(cover, &layout, &palette))
        .child(content)
        .child(header(&label, &layout, &palette))
        .child_opt(equalizer)
        .child(progress_bar(snapshot, &layout, &palette))
        .child(
            text(layout.text_x, layout.time_y, 11, palette.muted)
                .attr("id", "time")
                .text(format!(
                    "{} / {}",
                    ms_to_clock(snapshot.progress_ms as i64),
                    ms_to_clock(snapshot.duration_ms as i64)
                )),
        );

    canvas(&layout, &label)
        .child(Element::new("title").text(accessible_title(snapshot, &label)))
        .child(defs(&layout))
        .child(card)
        .child(border(&layout, &palette))
        .render()
}

/// Renders a minimal card carrying an error message.
///
/// Used by the SVG endpoint so embedders always receive a valid image.
pub fn render_error(message: &str, options: &RenderOptions) -> String {
    let layout = Layout::new(options);
    let palette = options.theme.palette();

    let card = Element::new("g")
        .attr("clip-path", "url(#card-clip)")
        .child(background(&layout, &palette))
        .child(header("Error", &layout, &palette))
        .child(
            text(layout.text_x, layout.title_y, 14, palette.text)
                .attr("id", "message")
                .text(message),
        );

    canvas(&layout, "Error")
        .child(Element::new("title").text(format!("Error: {}", message)))
        .child(defs(&layout))
        .child(card)
        .child(border(&layout, &palette))
        .render()
}

/// Filled width of the progress bar: `round(CONTENT_WIDTH * progress / duration)`.
pub fn filled_width(progress_ms: u64, duration_ms: u64) -> u32 {
    if duration_ms == 0 {
        return 0;
    }
    let progress = progress_ms.min(duration_ms) as u128;
    let duration = duration_ms as u128;
    let filled = (2 * CONTENT_WIDTH as u128 * progress + duration) / (2 * duration);
    filled as u32
}

fn status_label(snapshot: &PlaybackSnapshot, options: &RenderOptions) -> String {
    match &options.status_label {
        Some(label) => label.clone(),
        None if snapshot.is_playing => "Now Playing".to_string(),
        None => "Not Playing".to_string(),
    }
}

fn title_line(snapshot: &PlaybackSnapshot) -> &str {
    if snapshot.title.is_empty() {
        PLACEHOLDER
    } else {
        &snapshot.title
    }
}

/// The placeholder follows the playing flag, not the presence of artists.
fn artist_line(snapshot: &PlaybackSnapshot) -> String {
    if !snapshot.is_playing {
        NOT_PLAYING_ARTIST.to_string()
    } else if !snapshot.artists.is_empty() {
        snapshot.artists.join(", ")
    } else if !snapshot.album.is_empty() {
        snapshot.album.clone()
    } else {
        PLACEHOLDER.to_string()
    }
}

fn accessible_title(snapshot: &PlaybackSnapshot, label: &str) -> String {
    format!("{}: {} by {}", label, title_line(snapshot), artist_line(snapshot))
}

fn canvas(layout: &Layout, label: &str) -> Element {
    Element::new("svg")
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("width", layout.width)
        .attr("height", layout.height)
        .attr("viewBox", format!("0 0 {} {}", layout.width, layout.height))
        .attr("role", "img")
        .attr("aria-label", label)
}

fn defs(layout: &Layout) -> Element {
    Element::new("defs")
        .child(
            Element::new("clipPath").attr("id", "card-clip").child(
                Element::new("rect")
                    .attr("width", layout.width)
                    .attr("height", layout.height)
                    .attr("rx", CORNER_RADIUS),
            ),
        )
        .child(
            Element::new("filter")
                .attr("id", "backdrop-blur")
                .attr("x", "-20%")
                .attr("y", "-20%")
                .attr("width", "140%")
                .attr("height", "140%")
                .child(Element::new("feGaussianBlur").attr("stdDeviation", 24)),
        )
}

fn background(layout: &Layout, palette: &Palette) -> Element {
    Element::new("rect")
        .attr("width", layout.width)
        .attr("height", layout.height)
        .attr("fill", palette.background)
}

fn backdrop(cover: &str, layout: &Layout, palette: &Palette) -> Element {
    Element::new("image")
        .attr("id", "backdrop")
        .attr("href", cover)
        .attr("x", -40)
        .attr("y", -40)
        .attr("width", layout.width + 80)
        .attr("height", layout.height + 80)
        .attr("preserveAspectRatio", "xMidYMid slice")
        .attr("opacity", palette.backdrop_opacity)
        .attr("filter", "url(#backdrop-blur)")
}

fn border(layout: &Layout, palette: &Palette) -> Element {
    Element::new("rect")
        .attr("x", 0.5)
        .attr("y", 0.5)
        .attr("width", layout.width - 1)
        .attr("height", layout.height - 1)
        .attr("rx", CORNER_RADIUS)
        .attr("fill", "none")
        .attr("stroke", palette.border)
}

fn text(x: u32, y: u32, font_size: u32, fill: &str) -> Element {
    Element::new("text")
        .attr("x", x)
        .attr("y", y)
        .attr("font-family", FONT_FAMILY)
        .attr("font-size", font_size)
        .attr("fill", fill)
}

fn header(label: &str, layout: &Layout, palette: &Palette) -> Element {
    text(layout.text_x, layout.header_y, 12, palette.muted)
        .attr("id", "status")
        .attr("font-weight", 600)
        .attr("letter-spacing", 1)
        .text(label)
}

fn text_block(snapshot: &PlaybackSnapshot, layout: &Layout, palette: &Palette) -> Element {
    let badge = snapshot.explicit.then(|| explicit_badge(layout));

    Element::new("g")
        .attr("id", "text")
        .child_opt(badge)
        .child(
            text(layout.text_x, layout.title_y, 20, palette.text)
                .attr("id", "title")
                .attr("font-weight", 700)
                .text(title_line(snapshot)),
        )
        .child(
            text(layout.text_x, layout.artist_y, 14, palette.muted)
                .attr("id", "artist")
                .text(artist_line(snapshot)),
        )
}

/// Sits in the gutter between the art and the text column, level with the title.
fn explicit_badge(layout: &Layout) -> Element {
    let x = layout.text_x - EXPLICIT_BADGE_OFFSET;
    let y = layout.title_y - EXPLICIT_BADGE_SIZE;
    Element::new("g")
        .attr("id", "explicit-badge")
        .child(
            Element::new("rect")
                .attr("id", "explicit-badge-box")
                .attr("x", x)
                .attr("y", y)
                .attr("width", EXPLICIT_BADGE_SIZE)
                .attr("height", EXPLICIT_BADGE_SIZE)
                .attr("rx", 2)
                .attr("fill", EXPLICIT_COLOR),
        )
        .child(
            text(x + EXPLICIT_BADGE_SIZE / 2, y + 11, 10, "#FFFFFF")
                .attr("font-weight", 700)
                .attr("text-anchor", "middle")
                .text("E"),
        )
}

/// Bars bottom-aligned on the header baseline, each looping at its own pace.
fn equalizer(layout: &Layout, accent: &str) -> Element {
    let eq_width = EQ_BARS * EQ_BAR_WIDTH + (EQ_BARS - 1) * EQ_BAR_GAP;
    let x0 = layout.text_x + CONTENT_WIDTH - eq_width;
    let baseline = layout.header_y;

    let heights = join_values(EQ_HEIGHTS.iter().copied());
    let offsets = join_values(EQ_HEIGHTS.iter().map(|h| baseline - h));

    let bars = (0..EQ_BARS).map(|i| {
        let dur = format!("{}ms", EQ_BASE_DURATION_MS + EQ_STAGGER_MS * i);
        Element::new("rect")
            .attr("x", x0 + i * (EQ_BAR_WIDTH + EQ_BAR_GAP))
            .attr("y", baseline - EQ_HEIGHTS[0])
            .attr("width", EQ_BAR_WIDTH)
            .attr("height", EQ_HEIGHTS[0])
            .attr("rx", 1)
            .attr("fill", accent)
            .child(repeating("height", &heights, &dur))
            .child(repeating("y", &offsets, &dur))
    });

    Element::new("g").attr("id", "equalizer").children(bars)
}

fn repeating(attribute: &str, values: &str, dur: &str) -> Element {
    Element::new("animate")
        .attr("attributeName", attribute)
        .attr("values", values)
        .attr("dur", dur)
        .attr("repeatCount", "indefinite")
}

fn join_values(values: impl Iterator<Item = u32>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(";")
}

/// Track plus fill; the fill grows to full width over the remaining time so it
/// completes exactly when the track ends.
fn progress_bar(snapshot: &PlaybackSnapshot, layout: &Layout, palette: &Palette) -> Element {
    let filled = filled_width(snapshot.progress_ms, snapshot.duration_ms);
    let animate = snapshot.is_playing
        && snapshot.remaining_ms > MIN_ANIMATED_REMAINING_MS
        && filled < CONTENT_WIDTH;

    let growth = animate.then(|| {
        Element::new("animate")
            .attr("attributeName", "width")
            .attr("from", filled)
            .attr("to", CONTENT_WIDTH)
            .attr("dur", format!("{}ms", snapshot.remaining_ms))
            .attr("calcMode", "linear")
            .attr("fill", "freeze")
    });

    Element::new("g")
        .attr("id", "progress")
        .child(
            Element::new("rect")
                .attr("id", "progress-track")
                .attr("x", layout.text_x)
                .attr("y", layout.progress_y)
                .attr("width", CONTENT_WIDTH)
                .attr("height", PROGRESS_HEIGHT)
                .attr("rx", PROGRESS_HEIGHT / 2)
                .attr("fill", palette.track),
        )
        .child(
            Element::new("rect")
                .attr("id", "progress-fill")
                .attr("x", layout.text_x)
                .attr("y", layout.progress_y)
                .attr("width", filled)
                .attr("height", PROGRESS_HEIGHT)
                .attr("rx", PROGRESS_HEIGHT / 2)
                .attr("fill", &snapshot.accent)
                .child_opt(growth),
        )
}
