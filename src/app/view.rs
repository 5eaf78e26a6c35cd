use super::messages::Message;
use super::state::App;
use crate::theme::{Theme, css_color, to_iced};
use folio_core::color::{Color as CssColor, blend_over};
use folio_core::content::{Project, Social, TimelineEntry};
use folio_core::contrast::{MUTED_VAR, TEXT_VAR};
use folio_core::dom::{Document, Element as Node};
use folio_core::page::{TileGroup, TileNodes};
use folio_core::shell::{
    GREETING_PLATFORM_ID, INTRO_TYPEWRITER_ID, MODAL_CLOSE_ID, PROJECTS_TYPEWRITER_ID,
};
use folio_core::surface::estimate_surface_color;
use folio_core::timeline::{MODAL_DESCRIPTION_ID, MODAL_META_ID, MODAL_TITLE_ID};
use folio_core::typewriter::{CursorSide, Frame, Highlighter};
use iced::alignment::Vertical;
use iced::widget::text::Span;
use iced::widget::{
    Column, Row, button, center, checkbox, column, container, horizontal_space, mouse_area,
    opaque, rich_text, row, scrollable, span, stack, text,
};
use iced::{Border, Color, Element, Length};

const CURSOR: &str = "\u{258d}";
const TRIGGER_STRIP: &str = "timeline-triggers";
/// Scrim under timeline cards, standing in for their photography.
const TIMELINE_SCRIM: CssColor = CssColor::new(0.0, 0.0, 0.0, 0.72);

/// Colors resolved once per frame from the document and theme.
#[derive(Debug, Clone, Copy)]
struct Palette {
    dark: bool,
    accent: Color,
    text: Color,
    muted: Color,
}

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let doc = self.doc.lock();
        let env = self.page.env();
        let palette = Palette {
            dark: env.dark_mode,
            accent: css_color(env.accent()).unwrap_or(Color::from_rgb(0.0, 0.48, 1.0)),
            text: if env.dark_mode {
                Color::from_rgb(0.96, 0.96, 0.97)
            } else {
                Color::from_rgb(0.11, 0.11, 0.12)
            },
            muted: Color::from_rgb(0.43, 0.43, 0.45),
        };
        let highlighter = self.page.highlighter();

        let theme_label = if env.dark_mode { "Day Mode" } else { "Night Mode" };
        let motion_label = if self.config.reduced_motion {
            "Allow Motion"
        } else {
            "Reduce Motion"
        };
        let controls = row![
            text("Folio").size(20),
            horizontal_space(),
            button(motion_label).on_press(Message::ToggleReducedMotion),
            button(theme_label).on_press(Message::ToggleTheme),
        ]
        .spacing(10)
        .align_y(Vertical::Center);

        let sections = column![
            controls,
            self.greeting_view(&doc, highlighter, palette),
            self.intro_view(&doc, highlighter, palette),
            self.timeline_view(&doc, palette),
            self.skills_view(palette),
            self.projects_view(&doc, highlighter, palette),
            self.contacts_view(&doc, palette),
        ]
        .spacing(36)
        .padding(32)
        .max_width(960);

        let page = container(scrollable(container(sections).center_x(Length::Fill)))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_| container::Style {
                background: Some(Theme::from(self.config.theme).page_background().into()),
                ..container::Style::default()
            });

        if self.modal_open() {
            stack![page, self.modal_view(&doc, palette)].into()
        } else {
            page.into()
        }
    }

    fn greeting_view(
        &self,
        doc: &Document,
        highlighter: &Highlighter,
        palette: Palette,
    ) -> Element<'_, Message> {
        let greeting = &self.page.content().greeting;
        let mut spans = Vec::new();
        push_runs(&mut spans, &greeting.description, highlighter, palette);
        let mut body = column![
            text(greeting.heading.clone()).size(44).color(palette.text),
            rich_text(spans).size(20),
        ]
        .spacing(12);
        let platform = text_by_id(doc, GREETING_PLATFORM_ID);
        if !platform.is_empty() {
            body = body.push(text(format!("on {platform}")).size(18).color(palette.accent));
        }
        body.into()
    }

    fn intro_view(
        &self,
        doc: &Document,
        highlighter: &Highlighter,
        palette: Palette,
    ) -> Element<'_, Message> {
        let intro = &self.page.content().intro;
        column![
            text(intro.heading.clone()).size(30).color(palette.text),
            text(intro.description.clone()).color(palette.muted),
            typewriter_view(doc, INTRO_TYPEWRITER_ID, highlighter, palette),
        ]
        .spacing(10)
        .into()
    }

    fn timeline_view(&self, doc: &Document, palette: Palette) -> Element<'_, Message> {
        let Some(pager) = self.page.pager() else {
            return Column::new().into();
        };
        let entries = &self.page.content().intro.timeline;
        let mut body = Column::new().spacing(14);

        if let Some((slide, entry)) = pager
            .active()
            .and_then(|index| Some((pager.slides().get(index)?, entries.get(index)?)))
        {
            let scrim = to_iced(blend_over(
                TIMELINE_SCRIM,
                folio_core::surface::page_background(palette.dark),
            ));
            let card = doc.get(slide.card);
            let control = doc.get(slide.expand);
            let checked = control.is_some_and(Node::is_checked);
            let enabled = control.is_some_and(|el| !el.has_attribute("disabled"));
            body = body.push(timeline_card(
                entry,
                slide.expand,
                checked,
                enabled,
                card_text(card, palette),
                scrim,
            ));
        }

        let single = pager.len() <= 1;
        let mut triggers = Row::new().spacing(8);
        for (index, slide) in pager.slides().iter().enumerate() {
            let label = doc
                .get(slide.trigger)
                .map(Node::text_content)
                .unwrap_or_default();
            let style = if pager.active() == Some(index) {
                button::primary
            } else {
                button::secondary
            };
            triggers = triggers.push(
                button(text(label))
                    .style(style)
                    .on_press(Message::SelectSlide(index)),
            );
        }
        let strip = scrollable(triggers)
            .id(trigger_strip_id())
            .direction(scrollable::Direction::Horizontal(scrollable::Scrollbar::new()))
            .width(Length::Fill);
        let nav = row![
            button("\u{2039}").on_press_maybe((!single).then_some(Message::PreviousSlide)),
            strip,
            button("\u{203a}").on_press_maybe((!single).then_some(Message::NextSlide)),
        ]
        .spacing(8)
        .align_y(Vertical::Center);

        body.push(nav).into()
    }

    fn skills_view(&self, palette: Palette) -> Element<'_, Message> {
        let skills = &self.page.content().skills;
        let list = skills
            .list
            .iter()
            .filter(|skill| !skill.trim().is_empty())
            .fold(Row::new().spacing(8), |row, skill| {
                row.push(
                    container(text(skill.trim().to_string()).size(14).color(palette.text))
                        .padding([4, 10])
                        .style(move |_| pill_style(palette)),
                )
            })
            .wrap();
        column![
            text("Skills").size(30).color(palette.text),
            text(skills.description.clone()).color(palette.muted),
            list,
        ]
        .spacing(10)
        .into()
    }

    fn projects_view(
        &self,
        doc: &Document,
        highlighter: &Highlighter,
        palette: Palette,
    ) -> Element<'_, Message> {
        let projects = &self.page.content().projects;
        let mut body = column![
            text("Projects").size(30).color(palette.text),
            typewriter_view(doc, PROJECTS_TYPEWRITER_ID, highlighter, palette),
        ]
        .spacing(14);

        // Tiles were rendered pro first, then hobby, in content order.
        let items = projects.pro.iter().chain(projects.hobby.iter());
        let tiles: Vec<(&TileNodes, &Project)> = self.page.tiles().iter().zip(items).collect();
        for group in [TileGroup::Pro, TileGroup::Hobby] {
            let in_group: Vec<_> = tiles.iter().filter(|(nodes, _)| nodes.group == group).collect();
            let Some(last) = in_group.last() else {
                continue;
            };
            let label = match group {
                TileGroup::Pro => "Professional",
                TileGroup::Hobby => "Side projects",
            };
            body = body.push(text(label).size(18).color(palette.muted));
            for row_index in 0..=last.0.row {
                let row = in_group
                    .iter()
                    .filter(|(nodes, _)| nodes.row == row_index)
                    .fold(Row::new().spacing(12), |row, (nodes, project)| {
                        row.push(tile_view(doc, nodes, project, palette))
                    });
                body = body.push(row);
            }
        }
        body.into()
    }

    fn contacts_view(&self, doc: &Document, palette: Palette) -> Element<'_, Message> {
        let socials = &self.page.content().socials;
        let cards = self
            .page
            .contacts()
            .iter()
            .zip(socials)
            .fold(Row::new().spacing(12), |row, (nodes, social)| {
                let card = doc.get(nodes.card);
                let checked = doc.get(nodes.expand).is_some_and(Node::is_checked);
                row.push(contact_view(social, nodes.expand, checked, card, palette))
            })
            .wrap();
        column![text("Contact").size(30).color(palette.text), cards]
            .spacing(14)
            .into()
    }

    fn modal_view(&self, doc: &Document, palette: Palette) -> Element<'_, Message> {
        let backdrop_node = doc.find_by_class("modal-backdrop").first().copied();
        let close_node = doc.find_by_id(MODAL_CLOSE_ID);

        let mut close = button("Close");
        if let Some(node) = close_node {
            close = close.on_press(Message::ModalDismissed(node));
        }
        let panel = container(
            column![
                row![horizontal_space(), close],
                text(text_by_id(doc, MODAL_TITLE_ID)).size(26).color(palette.text),
                text(text_by_id(doc, MODAL_META_ID)).color(palette.muted),
                text(text_by_id(doc, MODAL_DESCRIPTION_ID)).color(palette.text),
            ]
            .spacing(12),
        )
        .padding(24)
        .max_width(640)
        .style(move |_| container::Style {
            background: Some(
                to_iced(folio_core::surface::page_background(palette.dark)).into(),
            ),
            border: Border {
                radius: 16.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        });

        let mut backdrop = mouse_area(
            container(center(opaque(panel)))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_| container::Style {
                    background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.55).into()),
                    ..container::Style::default()
                }),
        );
        if let Some(node) = backdrop_node {
            backdrop = backdrop.on_press(Message::ModalDismissed(node));
        }
        opaque(backdrop)
    }
}

/// Horizontal strip holding the timeline's slide triggers.
pub(super) fn trigger_strip_id() -> scrollable::Id {
    scrollable::Id::new(TRIGGER_STRIP)
}

fn text_by_id(doc: &Document, id: &str) -> String {
    doc.find_by_id(id)
        .and_then(|node| doc.get(node))
        .map(Node::text_content)
        .unwrap_or_default()
}

/// Text and muted colors from the card's contrast tokens.
fn card_text(card: Option<&Node>, palette: Palette) -> (Color, Color) {
    let token = |name: &str| card.and_then(|el| el.style_var(name)).and_then(css_color);
    (
        token(TEXT_VAR).unwrap_or(palette.text),
        token(MUTED_VAR).unwrap_or(palette.muted),
    )
}

fn push_runs(
    spans: &mut Vec<Span<'static, Message>>,
    raw: &str,
    highlighter: &Highlighter,
    palette: Palette,
) {
    for run in highlighter.runs(raw) {
        let color = if run.highlighted { palette.accent } else { palette.text };
        spans.push(span(run.text.to_string()).color(color));
    }
}

fn typewriter_view<'a>(
    doc: &Document,
    id: &str,
    highlighter: &Highlighter,
    palette: Palette,
) -> Element<'a, Message> {
    let frame = doc
        .find_by_id(id)
        .and_then(|node| doc.get(node))
        .and_then(Node::frame)
        .cloned();
    let Some(frame) = frame else {
        return Column::new().into();
    };
    rich_text(frame_spans(&frame, highlighter, palette)).size(22).into()
}

fn frame_spans(
    frame: &Frame,
    highlighter: &Highlighter,
    palette: Palette,
) -> Vec<Span<'static, Message>> {
    let cursor_color = if frame.animated {
        palette.accent
    } else {
        palette.muted
    };
    let cursor = || span(CURSOR).color(cursor_color);
    let mut spans = Vec::new();
    push_runs(&mut spans, &frame.question, highlighter, palette);
    match &frame.answer {
        None => spans.push(cursor()),
        Some(answer) => {
            if frame.cursor == CursorSide::Question {
                spans.push(cursor());
            }
            if !answer.is_empty() {
                spans.push(span(" "));
                let muted = Palette {
                    text: palette.muted,
                    ..palette
                };
                push_runs(&mut spans, answer, highlighter, muted);
            }
            if frame.cursor == CursorSide::Answer {
                spans.push(cursor());
            }
        }
    }
    spans
}

fn timeline_card<'a>(
    entry: &TimelineEntry,
    control: folio_core::NodeId,
    checked: bool,
    enabled: bool,
    (fg, muted): (Color, Color),
    scrim: Color,
) -> Element<'a, Message> {
    let mut expand = checkbox("Read more", checked)
        .style(move |theme, status| checkbox_style(theme, status, fg));
    if enabled {
        expand = expand.on_toggle(move |checked| Message::TimelineExpand { control, checked });
    }
    container(
        column![
            text(entry.title.clone()).size(24).color(fg),
            text(entry.meta_line()).color(muted),
            expand,
        ]
        .spacing(8),
    )
    .padding(24)
    .width(Length::Fill)
    .style(move |_| card_style(scrim))
    .into()
}

fn tile_view<'a>(
    doc: &Document,
    nodes: &TileNodes,
    project: &Project,
    palette: Palette,
) -> Element<'a, Message> {
    let card = doc.get(nodes.card);
    let (fg, muted) = card_text(card, palette);
    let surface = card
        .map(|el| to_iced(estimate_surface_color(el, palette.dark)))
        .unwrap_or(palette.text);
    let mut body = column![
        text(project.name.clone()).size(20).color(fg),
        text(project.description.clone()).color(muted),
    ]
    .spacing(6);
    if !project.tags.is_empty() {
        body = body.push(text(project.tags.join(" \u{b7} ")).size(13).color(muted));
    }
    if let Some(control) = nodes.expand {
        let checked = doc.get(control).is_some_and(Node::is_checked);
        body = body.push(
            checkbox("Details", checked)
                .style(move |theme, status| checkbox_style(theme, status, fg))
                .on_toggle(move |checked| Message::TileExpand { control, checked }),
        );
        if let Some(details) = project.details().filter(|_| checked) {
            body = body.push(text(details.to_string()).color(fg));
        }
    }
    let width = if nodes.wide_row {
        Length::FillPortion(1)
    } else {
        Length::Fill
    };
    container(body)
        .padding(18)
        .width(width)
        .style(move |_| card_style(surface))
        .into()
}

fn contact_view<'a>(
    social: &Social,
    control: folio_core::NodeId,
    checked: bool,
    card: Option<&Node>,
    palette: Palette,
) -> Element<'a, Message> {
    let (fg, muted) = card_text(card, palette);
    let surface = card
        .map(|el| to_iced(estimate_surface_color(el, palette.dark)))
        .unwrap_or(palette.text);
    let mut body = column![
        text(social.platform.clone()).size(18).color(fg),
        checkbox("Show", checked)
            .style(move |theme, status| checkbox_style(theme, status, fg))
            .on_toggle(move |checked| Message::ContactExpand { control, checked }),
    ]
    .spacing(6);
    if checked {
        body = body.push(text(social.username.clone()).color(muted));
        if let Some(url) = social.url.as_deref().filter(|url| !url.trim().is_empty()) {
            body = body.push(text(url.to_string()).size(13).color(muted));
        }
    }
    container(body)
        .padding(16)
        .style(move |_| card_style(surface))
        .into()
}

fn card_style(background: Color) -> container::Style {
    container::Style {
        background: Some(background.into()),
        border: Border {
            radius: 14.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

fn checkbox_style(theme: &iced::Theme, status: checkbox::Status, fg: Color) -> checkbox::Style {
    checkbox::Style {
        text_color: Some(fg),
        ..checkbox::primary(theme, status)
    }
}

fn pill_style(palette: Palette) -> container::Style {
    container::Style {
        background: Some(
            Color {
                a: 0.14,
                ..palette.accent
            }
            .into(),
        ),
        border: Border {
            radius: 999.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Palette {
        Palette {
            dark: false,
            accent: Color::from_rgb(0.0, 0.0, 1.0),
            text: Color::BLACK,
            muted: Color::from_rgb(0.5, 0.5, 0.5),
        }
    }

    #[test]
    fn single_line_frames_end_with_the_cursor() {
        let highlighter = Highlighter::from_keywords(["rust"]);
        let frame = Frame::line("I write Rust");
        let spans = frame_spans(&frame, &highlighter, palette());
        let texts: Vec<String> = spans.iter().map(|s| s.text.to_string()).collect();
        assert_eq!(texts, vec!["I write ", "Rust", CURSOR]);
        assert_eq!(spans[1].color, Some(palette().accent));
    }

    #[test]
    fn paired_frames_place_the_cursor_on_the_active_side() {
        let highlighter = Highlighter::default();
        let asking = Frame::pair("Who?", "", CursorSide::Question);
        let texts: Vec<String> = frame_spans(&asking, &highlighter, palette())
            .iter()
            .map(|s| s.text.to_string())
            .collect();
        assert_eq!(texts, vec!["Who?", CURSOR]);

        let answering = Frame::pair("Who?", "Me", CursorSide::Answer).frozen();
        let spans = frame_spans(&answering, &highlighter, palette());
        let texts: Vec<String> = spans.iter().map(|s| s.text.to_string()).collect();
        assert_eq!(texts, vec!["Who?", " ", "Me", CURSOR]);
        assert_eq!(spans[3].color, Some(palette().muted));
    }
}
