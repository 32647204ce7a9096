//! Card decks: fitting cards onto pages.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use kurbo::{Affine, Line, Point, Rect, Size, Vec2};

use crate::error::{ensure_non_negative, ensure_positive};
use crate::units::PaperSize;
use crate::{Color, Error, RenderContext, StrokeStyle};

/// A deck of identically sized cards laid out in a grid on each page.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deck {
    pub card: Size,
    /// Number of distinct cards.
    pub cards: usize,
    pub page: Size,
    pub margin: f64,
    /// Space between neighbouring cards.
    pub gap: Vec2,
    /// How many times each card is repeated.
    pub copies: usize,
    /// Centre the block of cards within the margins.
    pub centred: bool,
    /// How far card artwork extends beyond the cut line.
    pub bleed: f64,
}

/// Where one card lands.
#[derive(Clone, Debug, PartialEq)]
pub struct CardFrame {
    /// The card, counting from 1.
    pub number: usize,
    /// Which copy of the card, counting from 1.
    pub copy: usize,
    /// The page, counting from 0.
    pub page: usize,
    pub col: u32,
    pub row: u32,
    /// The cut outline of the card.
    pub rect: Rect,
}

impl Deck {
    /// A deck of `cards` cards on A4 paper with half-inch margins.
    pub fn new(card: Size, cards: usize) -> Deck {
        Deck {
            card,
            cards,
            page: PaperSize::A4.size(),
            margin: 36.0,
            gap: Vec2::ZERO,
            copies: 1,
            centred: true,
            bleed: 0.0,
        }
    }

    pub fn page(mut self, page: Size) -> Self {
        self.page = page;
        self
    }

    pub fn margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn gap(mut self, x: f64, y: f64) -> Self {
        self.gap = Vec2::new(x, y);
        self
    }

    pub fn copies(mut self, copies: usize) -> Self {
        self.copies = copies;
        self
    }

    pub fn centred(mut self, centred: bool) -> Self {
        self.centred = centred;
        self
    }

    pub fn bleed(mut self, bleed: f64) -> Self {
        self.bleed = bleed;
        self
    }

    /// Columns and rows of cards that fit on one page.
    pub fn per_page(&self) -> Result<(u32, u32), Error> {
        ensure_positive("card width", self.card.width)?;
        ensure_positive("card height", self.card.height)?;
        ensure_non_negative("margin", self.margin)?;
        ensure_non_negative("horizontal gap", self.gap.x)?;
        ensure_non_negative("vertical gap", self.gap.y)?;
        let avail = self.available();
        let fit = |space: f64, card: f64, gap: f64| ((space + gap) / (card + gap) + 1e-9).floor();
        let cols = fit(avail.width, self.card.width, self.gap.x);
        let rows = fit(avail.height, self.card.height, self.gap.y);
        if cols < 1.0 || rows < 1.0 {
            return Err(Error::PageTooSmall);
        }
        Ok((cols as u32, rows as u32))
    }

    /// Total number of cards to print, counting copies.
    pub fn total(&self) -> usize {
        self.cards * self.copies
    }

    pub fn page_count(&self) -> Result<usize, Error> {
        let (cols, rows) = self.per_page()?;
        Ok(self.total().div_ceil(slots(cols, rows)?))
    }

    /// Every card in print order, page by page, row by row.
    pub fn frames(&self) -> Result<Vec<CardFrame>, Error> {
        if self.cards == 0 || self.copies == 0 {
            return Err(Error::EmptyGrid);
        }
        let (cols, rows) = self.per_page()?;
        let per_page = slots(cols, rows)?;
        let origin = self.block_origin(cols, rows);
        let step = Vec2::new(self.card.width + self.gap.x, self.card.height + self.gap.y);
        let frames: Vec<CardFrame> = (0..self.total())
            .map(|i| {
                let slot = i % per_page;
                let (col, row) = ((slot % cols as usize) as u32, (slot / cols as usize) as u32);
                let at = origin + Vec2::new(col as f64 * step.x, row as f64 * step.y);
                CardFrame {
                    number: i / self.copies + 1,
                    copy: i % self.copies + 1,
                    page: i / per_page,
                    col,
                    row,
                    rect: Rect::from_origin_size(at, self.card),
                }
            })
            .collect();
        log::debug!(
            "{} cards on {} pages of {}x{}",
            frames.len(),
            self.total().div_ceil(per_page),
            cols,
            rows
        );
        Ok(frames)
    }

    /// Short lines in the margins, in line with the card edges on a page.
    ///
    /// Marks start `bleed` away from the outside of the block of cards and
    /// run `length` further out.
    pub fn cut_marks(&self, page: usize, length: f64) -> Result<Vec<Line>, Error> {
        let frames: Vec<CardFrame> = self
            .frames()?
            .into_iter()
            .filter(|f| f.page == page)
            .collect();
        let Some(block) = frames.iter().map(|f| f.rect).reduce(|a, b| a.union(b)) else {
            return Ok(Vec::new());
        };
        let edges = |values: Vec<f64>| {
            let mut values = values;
            values.sort_by(f64::total_cmp);
            values.dedup_by(|a, b| (*a - *b).abs() < 1e-6);
            values
        };
        let xs = edges(frames.iter().flat_map(|f| [f.rect.x0, f.rect.x1]).collect());
        let ys = edges(frames.iter().flat_map(|f| [f.rect.y0, f.rect.y1]).collect());
        let near = self.bleed;
        let far = self.bleed + length;
        let mut marks = Vec::with_capacity(2 * (xs.len() + ys.len()));
        for x in xs {
            marks.push(Line::new((x, block.y0 - far), (x, block.y0 - near)));
            marks.push(Line::new((x, block.y1 + near), (x, block.y1 + far)));
        }
        for y in ys {
            marks.push(Line::new((block.x0 - far, y), (block.x0 - near, y)));
            marks.push(Line::new((block.x1 + near, y), (block.x1 + far, y)));
        }
        Ok(marks)
    }

    /// Draw one page of the deck.
    ///
    /// `draw_card` is called with the origin moved to the top-left of each
    /// card's cut line. Cut marks are drawn last, if `marks` is given.
    pub fn draw_page<R: RenderContext>(
        &self,
        ctx: &mut R,
        page: usize,
        marks: Option<(&Color, f64)>,
        mut draw_card: impl FnMut(&mut R, &CardFrame) -> Result<(), Error>,
    ) -> Result<(), Error> {
        for frame in self.frames()?.iter().filter(|f| f.page == page) {
            ctx.with_save(|ctx| {
                ctx.transform(Affine::translate(frame.rect.origin().to_vec2()));
                draw_card(ctx, frame)
            })?;
        }
        if let Some((color, width)) = marks {
            let style = StrokeStyle::new();
            let length = (self.margin - self.bleed).clamp(0.0, 18.0);
            if length <= 0.0 {
                log::warn!("no room for cut marks with a bleed of {}", self.bleed);
                return Ok(());
            }
            for line in self.cut_marks(page, length)? {
                ctx.stroke(line, color, width, &style);
            }
        }
        Ok(())
    }

    fn available(&self) -> Size {
        Size::new(
            self.page.width - 2.0 * self.margin,
            self.page.height - 2.0 * self.margin,
        )
    }

    fn block_origin(&self, cols: u32, rows: u32) -> Point {
        let corner = Point::new(self.margin, self.margin);
        if !self.centred {
            return corner;
        }
        let block = Size::new(
            cols as f64 * self.card.width + (cols - 1) as f64 * self.gap.x,
            rows as f64 * self.card.height + (rows - 1) as f64 * self.gap.y,
        );
        let avail = self.available();
        corner + Vec2::new(avail.width - block.width, avail.height - block.height) / 2.0
    }
}

fn slots(cols: u32, rows: u32) -> Result<usize, Error> {
    (cols as usize)
        .checked_mul(rows as usize)
        .ok_or(Error::InvalidSpacing("too many cards fit on one page"))
}

impl CardFrame {
    /// The card outline grown by `bleed` on every side.
    pub fn bleed_rect(&self, bleed: f64) -> Rect {
        self.rect.inflate(bleed, bleed)
    }
}

/// Which pages to produce, counting from 1.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PageSelection {
    #[default]
    All,
    Pages(Vec<RangeInclusive<usize>>),
}

impl PageSelection {
    /// Parse a list such as `1,3-5`.
    pub fn parse(s: &str) -> Result<PageSelection, Error> {
        let bad = || Error::InvalidPageRange(s.to_string());
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }
        let mut ranges = Vec::new();
        for part in trimmed.split(',') {
            let part = part.trim();
            let (lo, hi) = match part.split_once('-') {
                Some((lo, hi)) => (lo.trim(), hi.trim()),
                None => (part, part),
            };
            let lo: usize = lo.parse().map_err(|_| bad())?;
            let hi: usize = hi.parse().map_err(|_| bad())?;
            if lo == 0 || hi < lo {
                return Err(bad());
            }
            ranges.push(lo..=hi);
        }
        Ok(PageSelection::Pages(ranges))
    }

    pub fn contains(&self, page: usize) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Pages(ranges) => ranges.iter().any(|r| r.contains(&page)),
        }
    }
}

impl FromStr for PageSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageSelection::parse(s)
    }
}

impl fmt::Display for PageSelection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PageSelection::All => write!(f, "all"),
            PageSelection::Pages(ranges) => {
                for (i, r) in ranges.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    if r.start() == r.end() {
                        write!(f, "{}", r.start())?;
                    } else {
                        write!(f, "{}-{}", r.start(), r.end())?;
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullRenderContext;

    // a poker card is 2.5 x 3.5 inches
    fn poker() -> Deck {
        Deck::new(Size::new(180.0, 252.0), 10)
    }

    #[test]
    fn cards_per_page() {
        // A4 less half-inch margins is about 523 x 770 points
        assert_eq!(poker().per_page().unwrap(), (2, 3));
        assert_eq!(poker().margin(0.0).per_page().unwrap(), (3, 3));
        assert_eq!(poker().gap(200.0, 0.0).per_page().unwrap(), (1, 3));
        let tiny = poker().page(Size::new(200.0, 200.0));
        assert!(matches!(tiny.per_page(), Err(Error::PageTooSmall)));
        assert!(Deck::new(Size::new(0.0, 1.0), 1).per_page().is_err());
    }

    #[test]
    fn tiny_cards_do_not_overflow() {
        let deck = Deck::new(Size::new(0.005, 0.005), 1);
        let (cols, rows) = deck.per_page().unwrap();
        assert!(cols as u64 * rows as u64 > u32::MAX as u64);
        assert_eq!(deck.page_count().unwrap(), 1);
        let frames = deck.frames().unwrap();
        assert_eq!((frames[0].col, frames[0].row, frames[0].page), (0, 0, 0));
    }

    #[test]
    fn negative_margins_and_gaps() {
        let err = poker().margin(-1.0).per_page().unwrap_err();
        assert!(matches!(err, Error::Negative { what: "margin", .. }));
        assert_eq!(err.to_string(), "The margin must not be negative (got -1)");
        assert!(matches!(
            poker().gap(0.0, -2.0).per_page(),
            Err(Error::Negative { what: "vertical gap", .. })
        ));
        // zero is fine
        assert!(poker().margin(0.0).gap(0.0, 0.0).per_page().is_ok());
    }

    #[test]
    fn exact_fit() {
        let deck = Deck::new(Size::new(50.0, 50.0), 4)
            .page(Size::new(120.0, 120.0))
            .margin(10.0);
        assert_eq!(deck.per_page().unwrap(), (2, 2));
        let frames = deck.frames().unwrap();
        assert_eq!(frames[3].rect, Rect::new(60.0, 60.0, 110.0, 110.0));
    }

    #[test]
    fn frames_fill_pages_in_order() {
        let deck = poker().copies(2);
        assert_eq!(deck.page_count().unwrap(), 4);
        let frames = deck.frames().unwrap();
        assert_eq!(frames.len(), 20);
        assert_eq!((frames[1].number, frames[1].copy), (1, 2));
        assert_eq!((frames[2].number, frames[2].col, frames[2].row), (2, 0, 1));
        assert_eq!(frames[6].page, 1);
        assert_eq!(frames[19].page, 3);
        // the block is centred on the page
        let block_left = frames[0].rect.x0;
        let block_right = frames[1].rect.x1;
        let page = PaperSize::A4.size();
        assert!((block_left - (page.width - block_right)).abs() < 1e-9);
        let uncentred = poker().centred(false).frames().unwrap();
        assert_eq!(uncentred[0].rect.origin(), Point::new(36.0, 36.0));
        assert!(poker().copies(0).frames().is_err());
    }

    #[test]
    fn cut_marks_follow_card_edges() {
        let deck = Deck::new(Size::new(50.0, 50.0), 3)
            .page(Size::new(200.0, 200.0))
            .margin(20.0)
            .gap(0.0, 0.0)
            .centred(false);
        // 3x3 per page; three cards fill one row
        let marks = deck.cut_marks(0, 5.0).unwrap();
        // four vertical edges and two horizontal ones, marked at both ends
        assert_eq!(marks.len(), 12);
        assert_eq!(marks[0], Line::new((20.0, 15.0), (20.0, 20.0)));
        assert!(deck.cut_marks(1, 5.0).unwrap().is_empty());
        let bled = deck.bleed(3.0).cut_marks(0, 5.0).unwrap();
        assert_eq!(bled[0], Line::new((20.0, 12.0), (20.0, 17.0)));
    }

    #[test]
    fn draw_page_visits_cards() {
        let deck = poker();
        let mut rc = NullRenderContext::new();
        let mut seen = Vec::new();
        deck.draw_page(&mut rc, 1, Some((&Color::BLACK, 0.5)), |rc, frame| {
            assert_eq!(rc.depth(), 1);
            seen.push(frame.number);
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec![7, 8, 9, 10]);
        assert_eq!(rc.depth(), 0);
        assert!(rc.shapes > 0);
    }

    #[test]
    fn no_cut_marks_when_the_bleed_fills_the_margin() {
        let deck = poker().margin(5.0).bleed(10.0);
        let count = |marks: Option<(&Color, f64)>| {
            let mut rc = NullRenderContext::new();
            deck.draw_page(&mut rc, 0, marks, |_, _| Ok(())).unwrap();
            rc.shapes
        };
        assert_eq!(count(Some((&Color::BLACK, 0.5))), count(None));
    }

    #[test]
    fn page_selection() {
        let sel = PageSelection::parse("1, 3-5").unwrap();
        assert!(sel.contains(1));
        assert!(!sel.contains(2));
        assert!(sel.contains(4));
        assert_eq!(sel.to_string(), "1,3-5");
        assert_eq!("all".parse::<PageSelection>().unwrap(), PageSelection::All);
        for bad in ["", "0", "5-3", "x", "1,,2"] {
            assert!(PageSelection::parse(bad).is_err(), "{}", bad);
        }
    }
}
