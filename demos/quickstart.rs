use qtty::Seconds;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempora::{CivilInstant, Interval, Unit};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let now = CivilInstant::from(chrono::Utc::now());
    println!("now (UTC):     {now}");
    println!("now (+05:30):  {:#}", now.in_timezone(19_800)?);
    println!("week start:    {}", now.truncated_to(Unit::Week));

    let leap: CivilInstant = "2016-12-31T23:59:60Z".parse()?;
    let next_year = leap + Seconds::new(1.0);
    println!("leap second:   {leap} -> {next_year}");

    let digits = Interval::new(0u8, 9);
    let mut rng = StdRng::seed_from_u64(7);
    println!("digits:        {digits} ({} elements)", digits.element_count()?);
    println!("three picks:   {:?}", digits.pick(&mut rng, 3)?);

    let evens: Vec<u64> = Interval::at_least(0u64)
        .to_sequence()?
        .iter()
        .filter(|n| n % 2 == 0)
        .take(5)
        .collect();
    println!("first evens:   {evens:?}");
    Ok(())
}
