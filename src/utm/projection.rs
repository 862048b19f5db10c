//! Transverse Mercator projection using the Krüger series to sixth order in the third flattening,
//! as formulated by Karney (2011), "Transverse Mercator with an accuracy of a few nanometers".
//! Accurate to well below a millimeter within a UTM zone.

use crate::utm::Ellipsoid;

const ORDER: usize = 6;
const NEWTON_TOLERANCE: f64 = 1e-12;
const NEWTON_MAX_ITERATIONS: usize = 10;

/// Projection on a given ellipsoid with the series coefficients precomputed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransverseMercator {
    eccentricity: f64,
    /// Rectifying radius, scaled by the central scale factor.
    scaled_radius: f64,
    alpha: [f64; ORDER],
    beta: [f64; ORDER],
}

impl TransverseMercator {
    pub fn new(ellipsoid: Ellipsoid, scale_factor: f64) -> Self {
        let n = ellipsoid.third_flattening();
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        let rectifying_radius = ellipsoid.semi_major_axis / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0 + n6 / 256.0);

        #[rustfmt::skip]
        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0 - 127.0 * n5 / 288.0 + 7891.0 * n6 / 37800.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0 + 281.0 * n5 / 630.0 - 1983433.0 * n6 / 1935360.0,
            61.0 * n3 / 240.0 - 103.0 * n4 / 140.0 + 15061.0 * n5 / 26880.0 + 167603.0 * n6 / 181440.0,
            49561.0 * n4 / 161280.0 - 179.0 * n5 / 168.0 + 6601661.0 * n6 / 7257600.0,
            34729.0 * n5 / 80640.0 - 3418889.0 * n6 / 1995840.0,
            212378941.0 * n6 / 319334400.0,
        ];

        #[rustfmt::skip]
        let beta = [
            n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0 - 81.0 * n5 / 512.0 + 96199.0 * n6 / 604800.0,
            n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0 + 46.0 * n5 / 105.0 - 1118711.0 * n6 / 3870720.0,
            17.0 * n3 / 480.0 - 37.0 * n4 / 840.0 - 209.0 * n5 / 4480.0 + 5569.0 * n6 / 90720.0,
            4397.0 * n4 / 161280.0 - 11.0 * n5 / 504.0 - 830251.0 * n6 / 7257600.0,
            4583.0 * n5 / 161280.0 - 108847.0 * n6 / 3991680.0,
            20648693.0 * n6 / 638668800.0,
        ];

        TransverseMercator {
            eccentricity: ellipsoid.eccentricity(),
            scaled_radius: scale_factor * rectifying_radius,
            alpha,
            beta,
        }
    }

    /// Projects a latitude and a longitude relative to the central meridian, both in degrees.
    /// Returns `(x, y)` in meters measured from the central meridian and the equator.
    pub fn forward(&self, latitude: f64, delta_longitude: f64) -> (f64, f64) {
        let phi = latitude.to_radians();
        let lambda = delta_longitude.to_radians();

        let tau = phi.tan();
        let tau_prime = self.conformal_tan(tau);

        let cos_lambda = lambda.cos();
        let xi_prime = tau_prime.atan2(cos_lambda);
        let eta_prime = (lambda.sin() / tau_prime.hypot(cos_lambda)).asinh();

        let mut xi = xi_prime;
        let mut eta = eta_prime;
        for (j, alpha) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += alpha * (k * xi_prime).sin() * (k * eta_prime).cosh();
            eta += alpha * (k * xi_prime).cos() * (k * eta_prime).sinh();
        }

        (self.scaled_radius * eta, self.scaled_radius * xi)
    }

    /// Inverse of [`TransverseMercator::forward`]. Returns `(latitude, delta_longitude)` in degrees.
    pub fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let eta = x / self.scaled_radius;
        let xi = y / self.scaled_radius;

        let mut xi_prime = xi;
        let mut eta_prime = eta;
        for (j, beta) in self.beta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi_prime -= beta * (k * xi).sin() * (k * eta).cosh();
            eta_prime -= beta * (k * xi).cos() * (k * eta).sinh();
        }

        let sinh_eta_prime = eta_prime.sinh();
        let cos_xi_prime = xi_prime.cos();
        let tau_prime = xi_prime.sin() / sinh_eta_prime.hypot(cos_xi_prime);
        let lambda = sinh_eta_prime.atan2(cos_xi_prime);

        let tau = self.geodetic_tan(tau_prime);
        (tau.atan().to_degrees(), lambda.to_degrees())
    }

    /// Tangent of the conformal latitude for the tangent of the geodetic latitude.
    fn conformal_tan(&self, tau: f64) -> f64 {
        let e = self.eccentricity;
        let sigma = (e * (e * tau / (1.0 + tau * tau).sqrt()).atanh()).sinh();
        tau * (1.0 + sigma * sigma).sqrt() - sigma * (1.0 + tau * tau).sqrt()
    }

    /// Solves `conformal_tan(tau) == tau_prime` for `tau` with Newton's method.
    fn geodetic_tan(&self, tau_prime: f64) -> f64 {
        let e2 = self.eccentricity * self.eccentricity;
        let mut tau = tau_prime;
        for _ in 0..NEWTON_MAX_ITERATIONS {
            let tau_i_prime = self.conformal_tan(tau);
            let delta = (tau_prime - tau_i_prime) / (1.0 + tau_i_prime * tau_i_prime).sqrt() * (1.0 + (1.0 - e2) * tau * tau)
                / ((1.0 - e2) * (1.0 + tau * tau).sqrt());
            tau += delta;
            if delta.abs() < NEWTON_TOLERANCE {
                break;
            }
        }
        tau
    }
}
