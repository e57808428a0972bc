mod accounts;
mod sessions;
mod transactions;
