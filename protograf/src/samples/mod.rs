//! Sample sheets for exercising backends.

use std::path::{Path, PathBuf};

use crate::kurbo::Size;
use crate::{Error, PageSelection, RenderContext};

mod sheet_0;
mod sheet_1;
mod sheet_2;
mod sheet_3;
mod sheet_4;

type BoxErr = Box<dyn std::error::Error>;

/// The total number of samples in this module.
pub const SAMPLE_COUNT: usize = 5;

/// Return a specific sample for drawing.
pub fn get<R: RenderContext>(number: usize) -> Result<Sample<R>, Error> {
    Ok(match number {
        0 => Sample::new(sheet_0::SIZE, 1, sheet_0::draw),
        1 => Sample::new(sheet_1::SIZE, 1, sheet_1::draw),
        2 => Sample::new(sheet_2::SIZE, 1, sheet_2::draw),
        3 => Sample::new(sheet_3::size(), sheet_3::pages()?, sheet_3::draw),
        4 => Sample::new(sheet_4::SIZE, 1, sheet_4::draw),
        _ => return Err(Error::InvalidSample(number)),
    })
}

/// A sample sheet: a page size, a page count and a way to draw each page.
pub struct Sample<T> {
    draw_f: fn(&mut T, usize) -> Result<(), Error>,
    size: Size,
    pages: usize,
}

impl<T> Sample<T> {
    fn new(size: Size, pages: usize, draw_f: fn(&mut T, usize) -> Result<(), Error>) -> Self {
        Sample {
            draw_f,
            size,
            pages,
        }
    }

    /// The page size, in points.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Draw one page, counting from 0.
    pub fn draw(&self, ctx: &mut T, page: usize) -> Result<(), Error> {
        if page >= self.pages {
            return Err(Error::InvalidArgs(format!(
                "page {} of a {} page sample",
                page + 1,
                self.pages
            )));
        }
        (self.draw_f)(ctx, page)
    }
}

/// The file name a backend should use for one page of a sample.
pub fn file_name(prefix: &str, number: usize, page: usize, extension: &str) -> String {
    format!("{}-{}-p{}.{}", prefix, number, page + 1, extension)
}

/// Arguments used by backend cli utilities.
#[derive(Debug)]
struct Args {
    all: bool,
    out_dir: PathBuf,
    pages: PageSelection,
    number: Option<usize>,
}

/// A shared `main` fn for different backends.
///
/// `f` takes a sample number, a page (counting from 0) and an output
/// directory, and writes that page. `prefix` names the backend in messages.
pub fn samples_main(
    f: fn(usize, usize, &Path) -> Result<(), BoxErr>,
    prefix: &str,
) -> Result<(), BoxErr> {
    let args = Args::from_env()?;
    run(args, f, prefix)
}

fn run(
    args: Args,
    f: fn(usize, usize, &Path) -> Result<(), BoxErr>,
    prefix: &str,
) -> Result<(), BoxErr> {
    if !args.out_dir.exists() {
        std::fs::create_dir_all(&args.out_dir)?;
    }

    if args.all {
        run_all(|number| run_one(number, &args, f, prefix))?;
    } else if let Some(number) = args.number {
        run_one(number, &args, f, prefix)?;
    }
    Ok(())
}

/// Write the selected pages of one sample.
fn run_one(
    number: usize,
    args: &Args,
    f: fn(usize, usize, &Path) -> Result<(), BoxErr>,
    prefix: &str,
) -> Result<(), BoxErr> {
    let pages = get::<crate::NullRenderContext>(number)?.pages();
    if let PageSelection::Pages(ranges) = &args.pages {
        for r in ranges.iter().filter(|r| *r.end() > pages) {
            log::warn!(
                "sample {} has {} pages; ignoring {}-{}",
                number,
                pages,
                r.start().max(&(pages + 1)),
                r.end()
            );
        }
    }
    for page in (0..pages).filter(|p| args.pages.contains(p + 1)) {
        f(number, page, &args.out_dir)?;
        log::info!(
            "{}: sample {} page {} written to {}",
            prefix,
            number,
            page + 1,
            args.out_dir.display()
        );
    }
    Ok(())
}

impl Args {
    fn from_env() -> Result<Args, BoxErr> {
        Args::parse(pico_args::Arguments::from_env())
    }

    fn parse(mut args: pico_args::Arguments) -> Result<Args, BoxErr> {
        let out_dir: Option<PathBuf> = args.opt_value_from_str("--directory")?;
        let pages: Option<String> = args.opt_value_from_str("--pages")?;

        let args = Args {
            all: args.contains("--all"),
            out_dir: out_dir.unwrap_or_else(|| PathBuf::from(".")),
            pages: match pages {
                Some(p) => PageSelection::parse(&p)?,
                None => PageSelection::All,
            },
            number: args.opt_free_from_str()?,
        };

        if !(args.all || args.number.is_some()) {
            Err(Box::new(Error::InvalidArgs(
                "expected a sample number or --all".into(),
            )))
        } else {
            Ok(args)
        }
    }
}

/// Run all samples, collecting and printing any errors encountered, without
/// aborting.
///
/// If any errors are encountered, the first is returned on completion.
fn run_all(f: impl Fn(usize) -> Result<(), BoxErr>) -> Result<(), BoxErr> {
    let mut errs = Vec::new();
    for sample in 0..SAMPLE_COUNT {
        if let Err(e) = f(sample) {
            errs.push((sample, e));
        }
    }

    if errs.is_empty() {
        Ok(())
    } else {
        for (sample, err) in &errs {
            log::error!("error in sample {}: '{}'", sample, err);
        }
        Err(errs.remove(0).1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use crate::NullRenderContext;

    fn args(list: &[&str]) -> Result<Args, BoxErr> {
        Args::parse(pico_args::Arguments::from_vec(
            list.iter().map(OsString::from).collect(),
        ))
    }

    #[test]
    fn every_sample_draws_every_page() {
        for number in 0..SAMPLE_COUNT {
            let sample = get::<NullRenderContext>(number).unwrap();
            assert!(sample.pages() >= 1);
            for page in 0..sample.pages() {
                let mut rc = NullRenderContext::new();
                sample.draw(&mut rc, page).unwrap();
                rc.finish().unwrap();
                assert!(rc.shapes > 0, "sample {} page {} is empty", number, page);
            }
            let mut rc = NullRenderContext::new();
            assert!(sample.draw(&mut rc, sample.pages()).is_err());
        }
        assert!(matches!(
            get::<NullRenderContext>(SAMPLE_COUNT),
            Err(Error::InvalidSample(5))
        ));
    }

    #[test]
    fn the_deck_sample_spans_pages() {
        let sample = get::<NullRenderContext>(3).unwrap();
        assert!(sample.pages() > 1);
    }

    #[test]
    fn parse_cli() {
        let a = args(&["--directory", "out", "--pages", "1,3", "2"]).unwrap();
        assert_eq!(a.out_dir, PathBuf::from("out"));
        assert_eq!(a.number, Some(2));
        assert!(a.pages.contains(3));
        assert!(!a.pages.contains(2));
        let all = args(&["--all"]).unwrap();
        assert!(all.all);
        assert_eq!(all.pages, PageSelection::All);
        assert!(args(&[]).is_err());
        assert!(args(&["--pages", "3-1", "1"]).is_err());
    }

    #[test]
    fn names() {
        assert_eq!(file_name("svg", 3, 0, "svg"), "svg-3-p1.svg");
    }

    #[test]
    fn run_writes_selected_pages() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn count(_n: usize, _page: usize, _dir: &Path) -> Result<(), BoxErr> {
            CALLS.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        let dir = std::env::temp_dir();
        let a = Args {
            all: false,
            out_dir: dir,
            pages: PageSelection::parse("1,99").unwrap(),
            number: Some(3),
        };
        run(a, count, "test").unwrap();
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }
}
