//! A deck of poker-sized cards spread over several A4 pages.

use crate::kurbo::{Point, Rect, RoundedRect, Size, Vec2};
use crate::{
    Color, Deck, Error, HexGeometry, HexOrientation, HexPiece, Label, PaperSize, Piece,
    RenderContext, Style, TextStyle,
};

const PALETTE: [Color; 3] = [Color::TAN, Color::LIGHT_GREY, Color::YELLOW];

pub fn size() -> Size {
    PaperSize::A4.size()
}

fn deck() -> Deck {
    Deck::new(Size::new(180., 252.), 9).copies(2).page(size())
}

pub fn pages() -> Result<usize, Error> {
    deck().page_count()
}

pub fn draw<R: RenderContext>(rc: &mut R, page: usize) -> Result<(), Error> {
    rc.clear(Color::WHITE);
    let deck = deck();
    let emblem = HexGeometry::from_side(HexOrientation::Pointy, 30.)?;
    let title = TextStyle::new(14., Color::BLACK);
    let small = TextStyle::new(7., Color::GREY);

    deck.draw_page(rc, page, Some((&Color::BLACK, 0.5)), |rc, frame| {
        let card = Rect::from_origin_size(Point::ORIGIN, deck.card);
        let background = Style::default().fill(PALETTE[(frame.number - 1) % PALETTE.len()]);
        rc.draw_styled(RoundedRect::from_rect(card, 8.), &background);
        rc.draw_text(&format!("Card {}", frame.number), Point::new(90., 24.), &title);
        HexPiece::new(emblem)
            .label(Label::new(frame.number.to_string()))
            .draw(rc, card.center(), 0.)?;
        let copy = format!("copy {} of {}", frame.copy, deck.copies);
        rc.draw_text(&copy, card.center() + Vec2::new(0., 100.), &small);
        Ok(())
    })
}
