mod applications;
mod apply;
mod categories;
mod health_check;
mod helpers;
mod marketing;
mod member_images;
mod members;
mod projects;
