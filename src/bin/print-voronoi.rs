//! Print the Voronoi diagram of the points in a file, or of stdin.
//!
//! Every line holds one point as `x,y`. Blank lines are skipped.
//!
//!     print-voronoi [--all-circles] [FILE]

extern crate fortune_voronoi;
extern crate env_logger;

use std::error::Error;
use std::fs;
use std::io::{self, Read};

use fortune_voronoi::{construct_with_config, dedup_sites, CircleRetention, FortuneConfig, Point};

fn parse_points(input: &str) -> Result<Vec<Point>, Box<dyn Error>> {
    input
        .lines()
        .map(str::trim)
        .enumerate()
        .filter(|&(_, line)| !line.is_empty())
        .map(|(number, line)| {
            let mut coordinates = line.split(',').map(str::trim);

            match (coordinates.next(), coordinates.next(), coordinates.next()) {
                (Some(x), Some(y), None) => Ok(Point::new(x.parse()?, y.parse()?)),
                _ => Err(format!("line {}: expected `x,y`, found `{}`", number + 1, line).into())
            }
        })
        .collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut config = FortuneConfig::default();
    let mut path = None;

    for argument in std::env::args().skip(1) {
        match argument.as_str() {
            "--all-circles" => config = config.circle_retention(CircleRetention::All),
            _ => path = Some(argument)
        }
    }

    let input = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            input
        }
    };

    let points = dedup_sites(parse_points(&input)?);
    let diagram = construct_with_config(&points, &config)?;

    println!("{}", diagram);

    match diagram.largest_circle() {
        Some(circle) => println!("Largest empty circle: {}", circle),
        None => println!("No empty circle.")
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse() {
        let points = parse_points("1,2\n\n 3.5 , -4 \n").unwrap();
        assert_eq!(points, vec![Point::new(1.0, 2.0), Point::new(3.5, -4.0)]);
    }

    #[test]
    fn parse_error() {
        assert!(parse_points("1,2,3").is_err());
        assert!(parse_points("1;2").is_err());
        assert!(parse_points("a,2").is_err());
    }
}
