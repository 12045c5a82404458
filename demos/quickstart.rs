use ocb_utils::{convert_time, datetime2hr, glon2slt, harmonic, CorrectionModel, OcbError, TimeSpec};

fn main() -> Result<(), OcbError> {
    // 2001-01-01 01:00:00, stamped as day code + seconds of day
    let dtime = convert_time(&TimeSpec::yyddd_sod("101001", 3_600.0))?;
    println!("timestamp: {dtime} (UT {:.3} h)", datetime2hr(&dtime));

    let glon = [0.0, 90.0, 180.0, -90.0];
    let slt = glon2slt(glon, &dtime);
    println!("longitude {glon:?} -> solar local time {slt:?}");

    let offsets = harmonic(slt, "ampere", "default")?;
    println!("harmonic offsets: {offsets:.4?}");

    let model = CorrectionModel::from_name("elliptical", "ampere", "gaussian", 0.0)?;
    let radii = model.corrected_radius(74.0, slt);
    println!("{model}: corrected radii {radii:.4?}");

    Ok(())
}
