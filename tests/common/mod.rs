use std::fmt::Write;

pub const DAY: i64 = 86_400;

/// Long-format csv for three assets. ABC is flat for `flat` days then rises 1% a day for `rising`
/// days, BCD and CDE never move. Rows are written newest first, the way some vendors ship them.
pub fn scenario_csv(flat: usize, rising: usize) -> String {
    let mut abc = Vec::new();
    let mut price = 100.0;
    for day in 0..(flat + rising) {
        if day >= flat {
            price *= 1.01;
        }
        abc.push(price);
    }

    let mut csv = String::from("date,symbol,close,is_liquid\n");
    for (day, abc_price) in abc.iter().enumerate().rev() {
        let date = day as i64 * DAY;
        writeln!(csv, "{},ABC,{},1", date, abc_price).unwrap();
        writeln!(csv, "{},BCD,50.0,1", date).unwrap();
        writeln!(csv, "{},CDE,20.0,1", date).unwrap();
    }
    csv
}
