//! The interactive shopping session.
//!
//! A line-oriented shell over the storefront engine: catalog browsing,
//! cart and wishlist edits, demo login, and the three-step checkout. Store
//! locks are never held across an await point; the simulated login and
//! payment delays run between lock scopes.

use std::io::{self, BufRead, Write};

use luxe_core::ProductId;
use luxe_storefront::auth;
use luxe_storefront::cart::CartStore;
use luxe_storefront::catalog::CatalogError;
use luxe_storefront::checkout::{CheckoutFlow, CheckoutTotals};
use luxe_storefront::fetch::{FetchError, RequestHandle};
use luxe_storefront::models::{PaymentCard, Product, ShippingDetails};
use luxe_storefront::{AppState, Result};

const HELP: &str = "\
Commands:
  list [category]      List the catalog, optionally one category
  show <id>            Show one product
  add <id>             Add one unit to the cart
  qty <id> <n>         Set a cart line's quantity (0 removes)
  remove <id>          Remove a cart line
  cart                 Show the cart with totals
  clear                Empty the cart
  wish                 Show the wishlist
  wish add <id>        Add a product to the wishlist
  wish rm <id>         Remove a product from the wishlist
  login                Log in (demo account: demo@luxury.com / demo123)
  logout               Log out and purge saved data
  account              Show the logged-in profile
  orders               Show order history
  checkout             Start checkout for the current cart
  help                 Show this help
  quit                 Leave the shop";

/// Run the interactive session until `quit` or end of input.
pub async fn run(state: &AppState) -> Result<()> {
    let mut session = Session::start(state.clone());
    println!("Welcome to Luxe. Type `help` for commands.");

    loop {
        let Some(line) = read_line("luxe> ") else {
            break;
        };
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        match command {
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,
            "list" => session.list(args.first().copied()).await,
            "show" => session.show(&args).await,
            "add" => session.add_to_cart(&args).await,
            "qty" => session.set_quantity(&args),
            "remove" => session.remove_from_cart(&args),
            "cart" => session.show_cart(),
            "clear" => {
                session.state.cart().clear();
                println!("Cart emptied.");
            }
            "wish" => session.wishlist(&args).await,
            "login" => session.login().await,
            "logout" => session.logout(),
            "account" => session.account(),
            "orders" => session.orders(),
            "checkout" => session.checkout().await,
            other => println!("Unknown command `{other}`; type `help`."),
        }
    }

    println!("Goodbye.");
    Ok(())
}

struct Session {
    state: AppState,
    /// Full catalog listing, fetched once per session.
    products: Option<Vec<Product>>,
    /// Listing prefetch started while the banner prints.
    prefetch: Option<RequestHandle<std::result::Result<Vec<Product>, CatalogError>>>,
}

impl Session {
    fn start(state: AppState) -> Self {
        let catalog = state.catalog().clone();
        let prefetch = RequestHandle::spawn(async move { catalog.list_products().await });
        Self {
            state,
            products: None,
            prefetch: Some(prefetch),
        }
    }

    /// The cached full listing, waiting on the prefetch the first time.
    async fn listing(&mut self) -> std::result::Result<&[Product], CatalogError> {
        if self.products.is_none() {
            let fetched = match self.prefetch.take() {
                Some(handle) => match handle.join().await {
                    Ok(result) => result?,
                    Err(FetchError::Aborted) => self.state.catalog().list_products().await?,
                },
                None => self.state.catalog().list_products().await?,
            };
            self.products = Some(fetched);
        }
        Ok(self.products.as_deref().unwrap_or_default())
    }

    /// Look up a product by id, preferring the cached listing.
    async fn product(&mut self, id: ProductId) -> std::result::Result<Product, CatalogError> {
        if let Ok(listing) = self.listing().await
            && let Some(product) = listing.iter().find(|p| p.id == id)
        {
            return Ok(product.clone());
        }
        self.state.catalog().get_product(id).await
    }

    async fn list(&mut self, category: Option<&str>) {
        let result = match category {
            Some(category) => self.state.catalog().products_by_category(category).await,
            None => self.listing().await.map(<[Product]>::to_vec),
        };
        match result {
            Ok(products) if products.is_empty() => println!("No products found."),
            Ok(products) => {
                for product in &products {
                    println!(
                        "  [{}] {} - {} ({})",
                        product.id, product.title, product.price, product.category
                    );
                }
            }
            Err(e) => println!("Could not load the catalog: {e}"),
        }
    }

    async fn show(&mut self, args: &[&str]) {
        let Some(id) = parse_id(args.first().copied()) else {
            return;
        };
        match self.product(id).await {
            Ok(product) => {
                println!("{} - {}", product.title, product.price);
                if !product.description.is_empty() {
                    println!("{}", product.description);
                }
                println!("Category: {}", product.category);
                let in_wishlist = self.state.account().is_in_wishlist(product.id);
                if in_wishlist {
                    println!("(in your wishlist)");
                }
            }
            Err(e) => println!("Could not load product {id}: {e}"),
        }
    }

    async fn add_to_cart(&mut self, args: &[&str]) {
        let Some(id) = parse_id(args.first().copied()) else {
            return;
        };
        match self.product(id).await {
            Ok(product) => {
                let title = product.title.clone();
                self.state.cart().add(&product);
                let count = self.state.cart().total_items();
                println!("Added {title} ({count} item(s) in cart).");
            }
            Err(e) => println!("Could not load product {id}: {e}"),
        }
    }

    fn set_quantity(&self, args: &[&str]) {
        let Some(id) = parse_id(args.first().copied()) else {
            return;
        };
        let Some(quantity) = args.get(1).and_then(|s| s.parse::<u32>().ok()) else {
            println!("Usage: qty <id> <n>");
            return;
        };
        self.state.cart().set_quantity(id, quantity);
        if quantity == 0 {
            println!("Removed line {id}.");
        } else {
            println!("Set line {id} to quantity {quantity}.");
        }
    }

    fn remove_from_cart(&self, args: &[&str]) {
        let Some(id) = parse_id(args.first().copied()) else {
            return;
        };
        self.state.cart().remove(id);
        println!("Removed line {id}.");
    }

    fn show_cart(&self) {
        let cart = self.state.cart();
        if cart.is_empty() {
            println!("Your cart is empty.");
            return;
        }
        for item in cart.items() {
            println!(
                "  [{}] {} x{} - {}",
                item.product_id,
                item.title,
                item.quantity,
                item.line_total()
            );
        }
        print_totals(&cart);
    }

    async fn wishlist(&mut self, args: &[&str]) {
        match args.first().copied() {
            None => {
                let account = self.state.account();
                if account.wishlist().is_empty() {
                    println!("Your wishlist is empty.");
                    return;
                }
                for product in account.wishlist() {
                    println!("  [{}] {} - {}", product.id, product.title, product.price);
                }
            }
            Some("add") => {
                let Some(id) = parse_id(args.get(1).copied()) else {
                    return;
                };
                match self.product(id).await {
                    Ok(product) => {
                        self.state.account().add_to_wishlist(&product);
                        println!("Added {} to your wishlist.", product.title);
                    }
                    Err(e) => println!("Could not load product {id}: {e}"),
                }
            }
            Some("rm") => {
                let Some(id) = parse_id(args.get(1).copied()) else {
                    return;
                };
                self.state.account().remove_from_wishlist(id);
                println!("Removed product {id} from your wishlist.");
            }
            Some(other) => println!("Unknown wishlist action `{other}`; use add/rm."),
        }
    }

    async fn login(&self) {
        if self.state.account().is_authenticated() {
            println!("Already logged in.");
            return;
        }
        let Some(email) = read_line("Email: ") else {
            return;
        };
        let Some(password) = read_line("Password: ") else {
            return;
        };

        println!("Signing in...");
        let delay = self.state.config().login_delay;
        match auth::login(email.trim(), password.trim(), delay).await {
            Ok(profile) => {
                let name = profile.name.clone();
                self.state.account().login_with_profile(profile);
                println!("Welcome back, {name}.");
            }
            Err(e) => println!("Login failed: {e}"),
        }
    }

    fn logout(&self) {
        let mut account = self.state.account();
        if !account.is_authenticated() {
            println!("Not logged in.");
            return;
        }
        account.logout();
        println!("Logged out; saved data purged.");
    }

    fn account(&self) {
        let account = self.state.account();
        let Some(user) = account.user() else {
            println!("Not logged in.");
            return;
        };
        println!("{} <{}>", user.name, user.email);
        println!("{}", user.phone);
        println!(
            "{}, {}, {} {}, {}",
            user.address.street, user.address.city, user.address.state, user.address.zip,
            user.address.country
        );
    }

    fn orders(&self) {
        let account = self.state.account();
        if account.orders().is_empty() {
            println!("No orders yet.");
            return;
        }
        for order in account.orders() {
            println!(
                "  #{} - {} - {} item(s) - {} - {}",
                order.id,
                order.date.format("%Y-%m-%d"),
                order.items.len(),
                order.total,
                order.status
            );
        }
    }

    async fn checkout(&self) {
        if self.state.cart().is_empty() {
            println!("Your cart is empty; add something first.");
            return;
        }

        let mut flow = CheckoutFlow::new();

        // Step 1: shipping
        let Some(shipping) = self.collect_shipping() else {
            println!("Checkout cancelled.");
            return;
        };
        if let Err(e) = flow.submit_shipping(shipping) {
            println!("Checkout failed: {e}");
            return;
        }

        {
            let cart = self.state.cart();
            if let Err(e) = flow.begin_payment(&cart) {
                println!("Checkout failed: {e}");
                return;
            }
            print_totals(&cart);
        }

        // Step 2: payment
        let Some(card) = collect_card() else {
            println!("Checkout cancelled.");
            return;
        };

        println!("Processing payment...");
        tokio::time::sleep(self.state.config().checkout_delay).await;

        let receipt = {
            let mut cart = self.state.cart();
            let mut account = self.state.account();
            flow.complete_payment(card, &mut cart, &mut account)
        };

        // Step 3: confirmation
        match receipt {
            Ok(receipt) => {
                println!("Order confirmed: {}", receipt.confirmation_number);
                println!("Total charged: {}", receipt.total);
                match receipt.order_id {
                    Some(id) => println!("Saved to your order history as #{id}."),
                    None => println!("Log in before checkout to keep an order history."),
                }
            }
            Err(e) => println!("Checkout failed: {e}"),
        }
    }

    /// Collect shipping details, prefilling from the profile when logged in.
    fn collect_shipping(&self) -> Option<ShippingDetails> {
        let saved = {
            let account = self.state.account();
            account.user().map(ShippingDetails::from_profile)
        };
        if let Some(saved) = saved {
            let answer = read_line("Ship to your saved address? [Y/n] ")?;
            if !answer.trim().eq_ignore_ascii_case("n") {
                return Some(saved);
            }
        }

        Some(ShippingDetails {
            first_name: read_line("First name: ")?,
            last_name: read_line("Last name: ")?,
            email: read_line("Email: ")?,
            phone: read_line("Phone: ")?,
            address: read_line("Street address: ")?,
            city: read_line("City: ")?,
            state: read_line("State: ")?,
            zip: read_line("ZIP: ")?,
            country: read_line("Country: ")?,
        })
    }
}

fn collect_card() -> Option<PaymentCard> {
    Some(PaymentCard {
        card_number: read_line("Card number: ")?,
        expiry: read_line("Expiry (MM/YY): ")?,
        name_on_card: read_line("Name on card: ")?,
    })
}

fn print_totals(cart: &CartStore) {
    let totals = CheckoutTotals::for_cart(cart);
    println!("  Subtotal: {}", totals.subtotal);
    println!("  Tax (8%): {}", totals.tax);
    println!("  Shipping: free");
    println!("  Total:    {}", totals.total);
}

fn parse_id(arg: Option<&str>) -> Option<ProductId> {
    match arg.and_then(|s| s.parse::<i32>().ok()) {
        Some(id) => Some(ProductId::new(id)),
        None => {
            println!("Expected a numeric product id.");
            None
        }
    }
}

/// Prompt and read one trimmed line; `None` on end of input.
fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}
